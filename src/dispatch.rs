// Dispatch module - runs controller effects off the UI loop
//
// Each effect becomes one detached tokio task that performs a single API call
// and sends the result back as an Outcome. Tasks are never cancelled or
// awaited by the loop; if the receiver is gone (app shutting down) the result
// is simply dropped.

use crate::api::ApiClient;
use crate::controller::{Effect, Outcome};
use tokio::sync::mpsc;

/// Outcome channel depth. Interactions can burst (one view per card).
pub const OUTCOME_BUFFER: usize = 256;

/// Spawns effects as background tasks
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: ApiClient,
    outcome_tx: mpsc::Sender<Outcome>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiver the UI loop drains
    pub fn new(client: ApiClient) -> (Self, mpsc::Receiver<Outcome>) {
        let (outcome_tx, outcome_rx) = mpsc::channel(OUTCOME_BUFFER);
        (Self { client, outcome_tx }, outcome_rx)
    }

    pub fn dispatch_all(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.dispatch(effect);
        }
    }

    /// Fire and forget
    pub fn dispatch(&self, effect: Effect) {
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        tracing::trace!("Dispatching {}", effect.name());

        tokio::spawn(async move {
            let outcome = run(&client, effect).await;
            if tx.send(outcome).await.is_err() {
                tracing::debug!("Outcome receiver closed, dropping result");
            }
        });
    }
}

/// Perform one effect against the backend
pub async fn run(client: &ApiClient, effect: Effect) -> Outcome {
    match effect {
        Effect::Login { email, password } => {
            Outcome::LoggedIn(client.login(&email, &password).await)
        }
        Effect::Register(registration) => {
            Outcome::Registered(client.register(&registration).await)
        }
        Effect::FetchCategories => Outcome::Categories(client.list_categories().await),
        Effect::FetchProducts { ticket, query } => Outcome::Products {
            ticket,
            result: client.list_products(&query).await,
        },
        Effect::FetchRecommendations {
            ticket,
            user_id,
            count,
        } => Outcome::Recommendations {
            ticket,
            result: client.get_recommendations(&user_id, count).await,
        },
        Effect::RecordInteraction(event) => {
            let result = client.record_interaction(&event).await;
            Outcome::InteractionSettled { event, result }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{InteractionEvent, InteractionKind, ProductQuery, RecommendationMethod};
    use crate::demo::DemoServer;
    use std::time::Duration;

    #[tokio::test]
    async fn outcomes_come_back_over_the_channel() {
        let server = DemoServer::start("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let client =
            ApiClient::new(&server.base_url(), RecommendationMethod::Collaborative).unwrap();
        let (dispatcher, mut outcome_rx) = Dispatcher::new(client);

        dispatcher.dispatch_all(vec![
            Effect::FetchProducts {
                ticket: 7,
                query: ProductQuery::new("", Some("Toys")),
            },
            Effect::RecordInteraction(InteractionEvent {
                user_id: "u001".to_string(),
                product_id: "p024".to_string(),
                kind: InteractionKind::View,
            }),
        ]);

        let mut saw_products = false;
        let mut saw_interaction = false;
        for _ in 0..2 {
            let outcome = tokio::time::timeout(Duration::from_secs(5), outcome_rx.recv())
                .await
                .unwrap()
                .unwrap();
            match outcome {
                Outcome::Products { ticket, result } => {
                    assert_eq!(ticket, 7);
                    assert_eq!(result.unwrap().len(), 2);
                    saw_products = true;
                }
                Outcome::InteractionSettled { event, result } => {
                    assert_eq!(event.product_id, "p024");
                    assert!(result.is_ok());
                    saw_interaction = true;
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }
        assert!(saw_products && saw_interaction);
        assert_eq!(server.interaction_count(Some("view")), 1);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn login_failure_is_an_outcome_not_a_panic() {
        let server = DemoServer::start("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let client =
            ApiClient::new(&server.base_url(), RecommendationMethod::Collaborative).unwrap();

        let outcome = run(
            &client,
            Effect::Login {
                email: "nobody@example.com".to_string(),
                password: "x".to_string(),
            },
        )
        .await;
        assert!(matches!(outcome, Outcome::LoggedIn(Err(_))));

        server.shutdown().await;
    }
}
