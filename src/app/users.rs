use std::sync::Arc;

use crate::domain::user::{NewUser, User};
use crate::error::Error;
use crate::infra::users::UserGateway;

/// Upper bound on rows returned by a single directory read.
const PAGE_SIZE: i64 = 10;

/// Read and bulk-write operations over the user table.
#[derive(Clone)]
pub struct UserService {
    gateway: Arc<dyn UserGateway>,
}

impl UserService {
    pub fn new(gateway: Arc<dyn UserGateway>) -> Self {
        Self { gateway }
    }

    /// Users strictly older than `age_from`, capped at one page.
    pub async fn list_older_than(&self, age_from: i64) -> Result<Vec<User>, Error> {
        if age_from < 0 {
            return Err(Error::InvalidArgument(format!(
                "ageFrom must be a non-negative integer, got {age_from}"
            )));
        }

        self.gateway.select_older_than(age_from, PAGE_SIZE).await
    }

    /// Users matching any of `names`, resolved in one batched lookup.
    /// Unknown names are simply absent from the result.
    pub async fn get_by_names(&self, names: &[String]) -> Result<Vec<User>, Error> {
        if names.is_empty() {
            return Err(Error::InvalidArgument("names must not be empty".into()));
        }

        self.gateway.select_by_names(names).await
    }

    /// Add the whole batch or nothing: every row is validated before the
    /// first write, and the gateway commits the batch in one transaction.
    pub async fn add_users(&self, users: &[NewUser]) -> Result<Vec<i64>, Error> {
        for (index, user) in users.iter().enumerate() {
            if user.name.trim().is_empty() {
                return Err(Error::InvalidArgument(format!(
                    "users[{index}].name is empty"
                )));
            }
            if user.last_name.trim().is_empty() {
                return Err(Error::InvalidArgument(format!(
                    "users[{index}].lastName is empty"
                )));
            }
            if user.age < 0 {
                return Err(Error::InvalidArgument(format!(
                    "users[{index}].age is negative"
                )));
            }
        }

        let ids = self.gateway.insert_batch(users).await?;
        tracing::info!(count = ids.len(), "added users");
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::users::MockUserGateway;
    use mockall::predicate::eq;

    fn user(id: i64, name: &str, age: i32) -> User {
        User {
            id,
            name: name.into(),
            last_name: "Smith".into(),
            origin: None,
            age,
            key: None,
        }
    }

    fn new_user(name: &str, last_name: &str, age: i32) -> NewUser {
        NewUser {
            name: name.into(),
            last_name: last_name.into(),
            age,
        }
    }

    #[tokio::test]
    async fn list_older_than_rejects_negative_age() {
        let service = UserService::new(Arc::new(MockUserGateway::new()));

        let err = service.list_older_than(-1).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn list_older_than_passes_page_cap_to_gateway() {
        let mut gateway = MockUserGateway::new();
        gateway
            .expect_select_older_than()
            .with(eq(18), eq(PAGE_SIZE))
            .times(1)
            .returning(|_, _| Ok(vec![user(1, "Ann", 30), user(2, "Bob", 44)]));
        let service = UserService::new(Arc::new(gateway));

        let users = service.list_older_than(18).await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Ann");
    }

    #[tokio::test]
    async fn list_older_than_accepts_zero() {
        let mut gateway = MockUserGateway::new();
        gateway
            .expect_select_older_than()
            .with(eq(0), eq(PAGE_SIZE))
            .times(1)
            .returning(|_, _| Ok(vec![]));
        let service = UserService::new(Arc::new(gateway));

        assert!(service.list_older_than(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_by_names_rejects_empty_input() {
        let service = UserService::new(Arc::new(MockUserGateway::new()));

        let err = service.get_by_names(&[]).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn get_by_names_issues_one_batched_lookup() {
        let names: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

        let mut gateway = MockUserGateway::new();
        gateway
            .expect_select_by_names()
            .withf(|requested| requested == ["a", "b", "c"])
            .times(1)
            .returning(|_| Ok(vec![user(1, "a", 20), user(3, "c", 25)]));
        let service = UserService::new(Arc::new(gateway));

        // Unknown name "b" is absent from the result, not an error.
        let users = service.get_by_names(&names).await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn add_users_rejects_invalid_row_before_any_write() {
        let mut gateway = MockUserGateway::new();
        gateway.expect_insert_batch().times(0);
        let service = UserService::new(Arc::new(gateway));

        let batch = vec![
            new_user("Ann", "Smith", 30),
            new_user("", "Jones", 25),
            new_user("Cid", "Brown", 41),
        ];
        let err = service.add_users(&batch).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let batch = vec![new_user("Ann", "Smith", -3)];
        let err = service.add_users(&batch).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn add_users_returns_ids_in_input_order() {
        let mut gateway = MockUserGateway::new();
        gateway
            .expect_insert_batch()
            .withf(|rows: &[NewUser]| rows.len() == 2 && rows[0].name == "Ann")
            .times(1)
            .returning(|_| Ok(vec![11, 12]));
        let service = UserService::new(Arc::new(gateway));

        let batch = vec![new_user("Ann", "Smith", 30), new_user("Bob", "Jones", 25)];
        assert_eq!(service.add_users(&batch).await.unwrap(), vec![11, 12]);
    }

    #[tokio::test]
    async fn add_users_surfaces_gateway_conflict() {
        let mut gateway = MockUserGateway::new();
        gateway
            .expect_insert_batch()
            .times(1)
            .returning(|_| Err(Error::Conflict("duplicate name".into())));
        let service = UserService::new(Arc::new(gateway));

        let batch = vec![new_user("Ann", "Smith", 30)];
        let err = service.add_users(&batch).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }
}
