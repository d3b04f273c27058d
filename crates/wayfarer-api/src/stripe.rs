use async_trait::async_trait;
use serde::Deserialize;

/// Opaque card-payment provider: given an amount in minor currency units,
/// produce a client secret the front end uses to finish the charge. The
/// server keeps no state about the intent.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> anyhow::Result<String>;
}

pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(secret_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key,
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> anyhow::Result<String> {
        #[derive(Deserialize)]
        struct IntentResponse {
            client_secret: String,
        }

        let form = [
            ("amount", amount_minor.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let resp = self
            .client
            .post("https://api.stripe.com/v1/payment_intents")
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json::<IntentResponse>()
            .await?;

        Ok(resp.client_secret)
    }
}
