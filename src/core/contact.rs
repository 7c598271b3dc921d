use crate::domain::ports::RecordStore;
use crate::domain::submission::{ContactForm, ContactReceipt, ContactRecord, Submission};
use crate::utils::error::{FieldErrors, Result};
use crate::utils::validation::{check_email, check_min_length, check_phone};

pub struct ContactService<S: RecordStore> {
    store: S,
    table: String,
}

impl<S: RecordStore> ContactService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            table: ContactRecord::TABLE.to_string(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn validate(&self, form: &ContactForm) -> Result<ContactRecord> {
        let mut errors = FieldErrors::new();

        check_min_length(&mut errors, "name", "Name", &form.name, 2);
        check_email(&mut errors, "email", &form.email);
        check_phone(&mut errors, "phone", &form.phone);
        check_min_length(&mut errors, "subject", "Subject", &form.subject, 5);
        check_min_length(&mut errors, "message", "Message", &form.message, 10);

        errors.into_result()?;

        Ok(ContactRecord {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            subject: form.subject.trim().to_string(),
            message: form.message.trim().to_string(),
        })
    }

    pub async fn submit(&self, form: &ContactForm) -> Result<ContactReceipt> {
        let record = self.validate(form)?;
        tracing::info!("📨 Sending contact message '{}'", record.subject);

        let payload = serde_json::to_value(&record)?;
        self.store.insert(&self.table, payload).await.map_err(|e| {
            tracing::error!("❌ Contact submission failed: {}", e);
            e
        })?;

        tracing::info!("✅ Contact message stored in '{}'", self.table);
        Ok(ContactReceipt { record })
    }
}
