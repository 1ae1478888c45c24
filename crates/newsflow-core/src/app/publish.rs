//! Publisher - the authoring flow.
//!
//! Turns a raw draft into a persisted post. Steps are strictly
//! sequential; each step's success gates the next:
//!
//! 1. validate the draft (no network on failure)
//! 2. upload the image, keep the hosted URL
//! 3. derive the excerpt from the rich content
//! 4. write the record, timestamped now; the store assigns the id
//!
//! The caller never gets the new post back from `publish`: visibility
//! comes through the standing subscription push, and only through it.
//! A store failure after a successful upload leaves the image orphaned;
//! no compensating delete is attempted.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{PostDraft, PostRecord, PublishError, excerpt};
use crate::ports::{Clock, ImageHost, PostStore};

pub struct Publisher {
    store: Arc<dyn PostStore>,
    images: Arc<dyn ImageHost>,
    clock: Arc<dyn Clock>,
}

impl Publisher {
    pub fn new(
        store: Arc<dyn PostStore>,
        images: Arc<dyn ImageHost>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            images,
            clock,
        }
    }

    /// Publish a draft article.
    ///
    /// Exactly one upload and one store write happen per successful
    /// call; zero or one of each per failed call, depending on the step
    /// that failed.
    pub async fn publish(&self, draft: PostDraft) -> Result<(), PublishError> {
        let draft = draft.validate()?;
        debug!(title = %draft.title, category = %draft.category, "publishing article");

        let image_url = self.images.upload(&draft.image).await?;

        let excerpt = excerpt::derive(&draft.content);
        let record = PostRecord {
            title: draft.title,
            category: draft.category,
            image_url,
            content: draft.content,
            excerpt,
            timestamp: self.clock.now_millis(),
        };

        let id = self.store.create(record).await?;
        debug!(%id, "article accepted by store");
        Ok(())
    }
}
