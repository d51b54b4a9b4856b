use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::contractor::ClientKind;
use crate::domain::notification::{
    NotificationResult, NotificationType, ReturnNotificationRequest, Status, TemplateData,
};
use crate::error::Error;
use crate::infra::directory::EntityDirectory;
use crate::infra::messaging::{DispatchContext, EmailMessage, MessagingGateway, NotificationEvent};
use crate::infra::templates::TemplateRenderer;

/// Permit scope an employee address must hold to receive goods-return
/// notifications.
const GOODS_RETURN_PERMIT: &str = "tsGoodsReturn";

/// Validates a change-of-status payload, resolves the referenced entities
/// and dispatches employee/client notifications. One linear pass per call;
/// nothing is retained between invocations.
pub struct ReturnNotificationService {
    directory: Arc<dyn EntityDirectory>,
    templates: Arc<dyn TemplateRenderer>,
    messaging: Arc<dyn MessagingGateway>,
}

impl ReturnNotificationService {
    pub fn new(
        directory: Arc<dyn EntityDirectory>,
        templates: Arc<dyn TemplateRenderer>,
        messaging: Arc<dyn MessagingGateway>,
    ) -> Self {
        Self {
            directory,
            templates,
            messaging,
        }
    }

    /// Validate, resolve, dispatch. Validation failures short-circuit
    /// before any notification is attempted. A missing reseller id alone
    /// is reported through the result object instead of an error; callers
    /// rely on that asymmetry.
    pub async fn process(
        &self,
        request: &ReturnNotificationRequest,
    ) -> Result<NotificationResult, Error> {
        let mut result = NotificationResult::default();

        if request.reseller_id == 0 {
            result.notification_client_by_sms.message = "Empty resellerId".into();
            return Ok(result);
        }
        let reseller_id = request.reseller_id;

        let notification_type = request
            .notification_type
            .and_then(NotificationType::from_code)
            .ok_or_else(|| Error::InvalidArgument("Empty notificationType".into()))?;

        self.directory
            .seller_by_id(reseller_id)
            .await?
            .ok_or_else(|| Error::NotFound("Seller not found!".into()))?;

        let client = self
            .directory
            .client_by_id(request.client_id)
            .await?
            .filter(|client| client.kind == ClientKind::Customer && client.seller_id == reseller_id)
            .ok_or_else(|| Error::NotFound("Client not found!".into()))?;

        let creator = self
            .directory
            .employee_by_id(request.creator_id)
            .await?
            .ok_or_else(|| Error::NotFound("Creator not found!".into()))?;

        let expert = self
            .directory
            .employee_by_id(request.expert_id)
            .await?
            .ok_or_else(|| Error::NotFound("Expert not found!".into()))?;

        let differences = self.differences_text(notification_type, request, reseller_id)?;

        let template_data = TemplateData {
            complaint_id: request.complaint_id,
            complaint_number: request.complaint_number.clone(),
            creator_id: request.creator_id,
            creator_name: creator.full_name,
            expert_id: request.expert_id,
            expert_name: expert.full_name,
            client_id: request.client_id,
            client_name: client.display_name().to_string(),
            consumption_id: request.consumption_id,
            consumption_number: request.consumption_number.clone(),
            agreement_number: request.agreement_number.clone(),
            date: request.date.clone(),
            differences,
        };
        template_data.validate()?;
        let params = template_data.params();

        let email_from = self.directory.reseller_email_from(reseller_id).await?;
        let emails = self
            .directory
            .emails_by_permit(reseller_id, GOODS_RETURN_PERMIT)
            .await?;

        if let Some(from) = email_from.as_deref() {
            for email in &emails {
                let message = EmailMessage {
                    from: from.to_string(),
                    to: email.clone(),
                    subject: self.templates.render(
                        "complaintEmployeeEmailSubject",
                        &params,
                        reseller_id,
                    )?,
                    body: self.templates.render(
                        "complaintEmployeeEmailBody",
                        &params,
                        reseller_id,
                    )?,
                };
                let context = DispatchContext {
                    reseller_id,
                    client_id: None,
                    event: NotificationEvent::ChangeReturnStatus,
                    status_to: None,
                };
                self.messaging.send_email(message, context).await?;
                result.notification_employee_by_email = true;
            }
        }

        // Client channels fire only on an actual status change.
        let status_to = request.differences.map(|change| change.to).unwrap_or(0);
        if notification_type == NotificationType::Change && status_to != 0 {
            if let (Some(from), Some(to)) = (email_from.as_deref(), client.email.as_deref()) {
                if !to.is_empty() {
                    let message = EmailMessage {
                        from: from.to_string(),
                        to: to.to_string(),
                        subject: self.templates.render(
                            "complaintClientEmailSubject",
                            &params,
                            reseller_id,
                        )?,
                        body: self.templates.render(
                            "complaintClientEmailBody",
                            &params,
                            reseller_id,
                        )?,
                    };
                    let context = DispatchContext {
                        reseller_id,
                        client_id: Some(client.id),
                        event: NotificationEvent::ChangeReturnStatus,
                        status_to: Some(status_to),
                    };
                    self.messaging.send_email(message, context).await?;
                    result.notification_client_by_email = true;
                }
            }

            if client.mobile.as_deref().is_some_and(|m| !m.is_empty()) {
                let delivery = self
                    .messaging
                    .send_sms(
                        reseller_id,
                        client.id,
                        NotificationEvent::ChangeReturnStatus,
                        status_to,
                        &params,
                    )
                    .await?;
                if delivery.sent {
                    result.notification_client_by_sms.is_sent = true;
                }
                if let Some(error) = delivery.error {
                    if !error.is_empty() {
                        tracing::warn!(reseller_id, client_id = client.id, error, "sms channel reported an error");
                        result.notification_client_by_sms.message = error;
                    }
                }
            }
        }

        tracing::info!(
            reseller_id,
            client_id = client.id,
            employee_email = result.notification_employee_by_email,
            client_email = result.notification_client_by_email,
            client_sms = result.notification_client_by_sms.is_sent,
            "processed return notification"
        );

        Ok(result)
    }

    fn differences_text(
        &self,
        notification_type: NotificationType,
        request: &ReturnNotificationRequest,
        reseller_id: i64,
    ) -> Result<String, Error> {
        match notification_type {
            NotificationType::New => {
                Ok(self
                    .templates
                    .render("NewPositionAdded", &BTreeMap::new(), reseller_id)?)
            }
            NotificationType::Change => match request.differences {
                Some(change) => {
                    let mut params = BTreeMap::new();
                    params.insert(
                        "FROM".to_string(),
                        Status::from_code(change.from)?.name().to_string(),
                    );
                    params.insert(
                        "TO".to_string(),
                        Status::from_code(change.to)?.name().to_string(),
                    );
                    Ok(self
                        .templates
                        .render("PositionStatusHasChanged", &params, reseller_id)?)
                }
                None => Ok(String::new()),
            },
        }
    }
}
