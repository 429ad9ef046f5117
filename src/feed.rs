//! Real-time activity feed: every appended activity is fanned out to the
//! subscribers of its user.

use futures::{Stream, stream};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::{entity::user_activity, prelude::*};

#[derive(Clone)]
pub struct Feed {
  tx: broadcast::Sender<user_activity::Model>,
}

impl Feed {
  pub fn new(capacity: usize) -> Self {
    let (tx, _) = broadcast::channel(capacity.max(1));
    Self { tx }
  }

  pub fn publish(&self, activity: user_activity::Model) {
    // no subscribers is the common case
    if let Err(err) = self.tx.send(activity) {
      debug!("Activity {} had no feed subscribers", err.0.id);
    }
  }

  pub fn subscribe(
    &self,
    user_id: Uuid,
  ) -> impl Stream<Item = user_activity::Model> + Send + use<> {
    let rx = self.tx.subscribe();

    stream::unfold(rx, move |mut rx| async move {
      loop {
        match rx.recv().await {
          Ok(activity) if activity.user_id == user_id => {
            return Some((activity, rx));
          }
          Ok(_) => continue,
          Err(RecvError::Lagged(skipped)) => {
            warn!("Feed subscriber for {user_id} lagged, skipped {skipped}");
          }
          Err(RecvError::Closed) => return None,
        }
      }
    })
  }
}

#[cfg(test)]
mod tests {
  use futures::StreamExt;

  use super::*;

  fn activity(user_id: Uuid, kind: &str) -> user_activity::Model {
    user_activity::Model {
      id: Uuid::new_v4(),
      user_id,
      activity_type: kind.into(),
      activity_data: None,
      points_earned: 5,
      streak_count: None,
      completed_at: Utc::now().naive_utc(),
    }
  }

  #[tokio::test]
  async fn delivers_only_own_activities() {
    let feed = Feed::new(8);
    let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

    let mut stream = Box::pin(feed.subscribe(alice));

    feed.publish(activity(bob, "product_viewed"));
    feed.publish(activity(alice, "symptom_check"));

    let got = stream.next().await.unwrap();
    assert_eq!(got.user_id, alice);
    assert_eq!(got.activity_type, "symptom_check");
  }

  #[tokio::test]
  async fn ends_when_feed_is_dropped() {
    let feed = Feed::new(8);
    let mut stream = Box::pin(feed.subscribe(Uuid::new_v4()));
    drop(feed);

    assert!(stream.next().await.is_none());
  }

  #[test]
  fn publish_without_subscribers_is_fine() {
    Feed::new(1).publish(activity(Uuid::new_v4(), "daily_claim"));
  }
}
