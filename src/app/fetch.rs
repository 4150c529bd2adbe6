//! Background request spawning and per-frame result polling

use super::{App, ResultSlot};
use crate::api::{RecommendationClient, RecommendationKind};
use crate::types::{ApiEntry, Recommendation};
use eframe::egui;
use tracing::{debug, info};

/// Map a raw response entry to a displayable recommendation.
///
/// Only the content lane synthesizes placeholder titles for legacy bare-id
/// entries; the collaborative lane drops them.
fn resolve_entry(kind: RecommendationKind, entry: ApiEntry) -> Option<Recommendation> {
    match entry {
        ApiEntry::Item(rec) => Some(rec),
        ApiEntry::RawId(id) => match kind {
            RecommendationKind::Content => Some(Recommendation::placeholder(id)),
            RecommendationKind::Collaborative => {
                debug!(id, "Dropping bare id in collaborative response");
                None
            }
        },
    }
}

/// Run one best-effort request on the app runtime. No cancellation and no
/// ordering guard: responses queue up in arrival order and the last one wins.
fn spawn_fetch(
    runtime: &tokio::runtime::Runtime,
    client: RecommendationClient,
    kind: RecommendationKind,
    identifier: String,
    slot: ResultSlot,
    ctx: egui::Context,
) {
    runtime.spawn(async move {
        let entries = client.fetch(kind, &identifier).await;
        let results: Vec<Recommendation> = entries
            .into_iter()
            .filter_map(|entry| resolve_entry(kind, entry))
            .collect();
        slot.lock().unwrap().push(results);
        ctx.request_repaint();
    });
}

/// Drain all responses that landed since the last frame. Returns how many
/// arrived and the most recent one.
fn drain_slot(slot: &ResultSlot) -> (u32, Option<Vec<Recommendation>>) {
    let mut landed = std::mem::take(&mut *slot.lock().unwrap());
    let count = landed.len() as u32;
    (count, landed.pop())
}

impl App {
    pub fn fetch_collaborative(&mut self, ctx: &egui::Context) {
        info!(person_id = %self.person_id, "Fetching collaborative recommendations");
        self.collab_in_flight += 1;
        spawn_fetch(
            &self.runtime,
            self.client.clone(),
            RecommendationKind::Collaborative,
            self.person_id.clone(),
            self.collab_slot.clone(),
            ctx.clone(),
        );
    }

    pub fn fetch_content(&mut self, ctx: &egui::Context) {
        info!(item_id = %self.article_id, "Fetching content recommendations");
        self.content_in_flight += 1;
        spawn_fetch(
            &self.runtime,
            self.client.clone(),
            RecommendationKind::Content,
            self.article_id.clone(),
            self.content_slot.clone(),
            ctx.clone(),
        );
    }

    /// Move finished responses from the shared slots into lane state.
    /// Called once per frame. The in-flight count drops by the number of
    /// responses that landed, so the spinner stays up while any request for
    /// the lane is still outstanding.
    pub fn poll_results(&mut self) {
        let (landed, latest) = drain_slot(&self.collab_slot);
        self.collab_in_flight = self.collab_in_flight.saturating_sub(landed);
        if let Some(results) = latest {
            info!(count = results.len(), "Collaborative lane updated");
            self.collab_results = results;
        }

        let (landed, latest) = drain_slot(&self.content_slot);
        self.content_in_flight = self.content_in_flight.saturating_sub(landed);
        if let Some(results) = latest {
            info!(count = results.len(), "Content lane updated");
            self.content_results = results;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    fn test_app() -> App {
        App {
            person_id: String::new(),
            article_id: String::new(),
            collab_results: Vec::new(),
            content_results: Vec::new(),
            collab_slot: Arc::new(Mutex::new(Vec::new())),
            content_slot: Arc::new(Mutex::new(Vec::new())),
            collab_in_flight: 0,
            content_in_flight: 0,
            client: RecommendationClient::new("http://127.0.0.1:9"),
            base_url: "http://127.0.0.1:9".into(),
            runtime: tokio::runtime::Runtime::new().unwrap(),
            show_settings: false,
            base_url_edit: String::new(),
            logo_texture: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn full_entries_pass_through_both_lanes() {
        let rec = Recommendation {
            content_id: 9,
            title: "Nine".into(),
        };
        for kind in [RecommendationKind::Collaborative, RecommendationKind::Content] {
            assert_eq!(
                resolve_entry(kind, ApiEntry::Item(rec.clone())),
                Some(rec.clone())
            );
        }
    }

    #[test]
    fn bare_id_gets_placeholder_title_in_content_lane() {
        let resolved = resolve_entry(RecommendationKind::Content, ApiEntry::RawId(183)).unwrap();
        assert_eq!(resolved.content_id, 183);
        assert_eq!(resolved.title, "Article 183");
    }

    #[test]
    fn bare_id_is_dropped_in_collaborative_lane() {
        assert_eq!(
            resolve_entry(RecommendationKind::Collaborative, ApiEntry::RawId(183)),
            None
        );
    }

    #[test]
    fn spinner_stays_on_until_last_overlapping_response() {
        let mut app = test_app();
        // Two clicks before either response lands
        app.collab_in_flight = 2;

        app.collab_slot
            .lock()
            .unwrap()
            .push(vec![Recommendation::placeholder(1)]);
        app.poll_results();
        assert_eq!(app.collab_in_flight, 1);
        assert_eq!(app.collab_results[0].content_id, 1);

        app.collab_slot
            .lock()
            .unwrap()
            .push(vec![Recommendation::placeholder(2)]);
        app.poll_results();
        assert_eq!(app.collab_in_flight, 0);
        assert_eq!(app.collab_results[0].content_id, 2);
    }

    #[test]
    fn two_responses_in_one_frame_keep_the_later_one() {
        let mut app = test_app();
        app.content_in_flight = 2;

        app.content_slot
            .lock()
            .unwrap()
            .push(vec![Recommendation::placeholder(1)]);
        app.content_slot
            .lock()
            .unwrap()
            .push(vec![Recommendation::placeholder(2)]);
        app.poll_results();

        assert_eq!(app.content_in_flight, 0);
        assert_eq!(app.content_results[0].content_id, 2);
    }
}
