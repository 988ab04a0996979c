//! # Bot Service
//!
//! Executes the effects the session state machine requests.
//!
//! ## Effect Execution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Effect Execution Flow                              │
//! │                                                                         │
//! │  transport event ──► registry.with_session(apply) ──► Step              │
//! │                                                                         │
//! │  Step::Reply ───────────────────────────────► deliver as-is            │
//! │  Step::Save ────► encode JSON, write blob ──► commit_snapshot          │
//! │  Step::Generate ► CSV + paginate + render ──► finish_generation        │
//! │  Step::BrowseArchive ► list JSON exports ───► menu of Open buttons     │
//! │  Step::Load ────► read blob, decode ────────► restore_snapshot         │
//! │                                                                         │
//! │  Commits happen only after the I/O succeeds. On failure the session    │
//! │  is left exactly where it was and the user gets a retryable message.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Generation is additionally guarded by the registry's per-user in-flight
//! flag: a second Generate while one is rendering is rejected, never queued.

use std::time::Duration;

use tracing::{info, warn};

use tagpress_core::export::{decode_snapshot, encode_csv, encode_json};
use tagpress_core::layout::render_document;
use tagpress_core::pagination::paginate;
use tagpress_core::session::{main_menu, MenuButton};
use tagpress_core::{CoreError, Event, MenuAction, Reply, Snapshot, Step, ARCHIVE_BROWSE_LIMIT};
use tagpress_store::{BlobStore, Category};

use crate::error::BotError;
use crate::rasterizer::Rasterizer;
use crate::registry::{SessionRegistry, UserId};

/// Default deadline for one PDF render.
const RENDER_TIMEOUT: Duration = Duration::from_secs(60);

/// The orchestration layer: session registry plus injected capabilities.
pub struct BotService<S, R> {
    registry: SessionRegistry,
    store: S,
    rasterizer: R,
    render_timeout: Duration,
}

struct GenerateOutcome {
    pages: usize,
    document: String,
}

impl<S: BlobStore, R: Rasterizer> BotService<S, R> {
    pub fn new(store: S, rasterizer: R) -> Self {
        BotService {
            registry: SessionRegistry::new(),
            store,
            rasterizer,
            render_timeout: RENDER_TIMEOUT,
        }
    }

    /// Overrides the render deadline.
    pub fn with_render_timeout(mut self, timeout: Duration) -> Self {
        self.render_timeout = timeout;
        self
    }

    /// Handles one inbound event for one user, executing whatever effect
    /// the state machine requests, and returns the reply to deliver.
    pub async fn handle(&self, user: UserId, event: Event) -> Reply {
        let step = self.registry.with_session(user, |session| session.apply(event));

        match step {
            Step::Reply(reply) => reply,
            Step::Save(snapshot) => self.save(user, snapshot).await,
            Step::Generate(snapshot) => self.generate(user, snapshot).await,
            Step::BrowseArchive => self.browse().await,
            Step::Load(name) => self.load(user, &name).await,
        }
    }

    // -------------------------------------------------------------------------
    // Save
    // -------------------------------------------------------------------------

    async fn save(&self, user: UserId, snapshot: Snapshot) -> Reply {
        match self.save_inner(&snapshot).await {
            Ok(()) => {
                info!(label = %snapshot.label, items = snapshot.item_count(), "Snapshot saved");
                let text = format!(
                    "Snapshot '{}' saved: {} item(s), {} label(s). Generate when ready.",
                    snapshot.label,
                    snapshot.item_count(),
                    snapshot.label_count()
                );
                self.registry
                    .with_session(user, |session| session.commit_snapshot(snapshot));
                Reply::with_menu(text, main_menu())
            }
            Err(err) => {
                warn!(error = %err, label = %snapshot.label, "Snapshot save failed");
                Reply::with_menu(err.user_message(), main_menu())
            }
        }
    }

    async fn save_inner(&self, snapshot: &Snapshot) -> Result<(), BotError> {
        let json = encode_json(snapshot)?;
        let name = format!("{}.json", snapshot.label);
        self.store.write(Category::JsonExport, &name, &json).await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Generate
    // -------------------------------------------------------------------------

    async fn generate(&self, user: UserId, snapshot: Snapshot) -> Reply {
        if snapshot.is_empty() {
            return Reply::with_menu(format!("{}.", CoreError::EmptyQueue), main_menu());
        }
        if !self.registry.try_begin_generation(user) {
            return Reply::text(
                "A document is already being generated for you - hold on.",
            );
        }

        let result = self.generate_inner(&snapshot).await;
        self.registry.end_generation(user);

        match result {
            Ok(outcome) => {
                self.registry
                    .with_session(user, |session| session.finish_generation());
                Reply::with_menu(
                    format!(
                        "Generated {} page(s) for '{}'. Saved as {}.",
                        outcome.pages, snapshot.label, outcome.document
                    ),
                    main_menu(),
                )
            }
            Err(err) => {
                warn!(error = %err, label = %snapshot.label, "Generation failed");
                Reply::with_menu(err.user_message(), main_menu())
            }
        }
    }

    async fn generate_inner(&self, snapshot: &Snapshot) -> Result<GenerateOutcome, BotError> {
        // Tabular export first; the PDF is the slow part
        let csv = encode_csv(snapshot)?;
        let csv_name = format!("{}.csv", snapshot.label);
        self.store.write(Category::CsvExport, &csv_name, &csv).await?;

        let pages = paginate(&snapshot.items);
        let page_count = pages.len();
        let html = render_document(&pages);

        let pdf = tokio::time::timeout(self.render_timeout, self.rasterizer.render_pdf(&html))
            .await
            .map_err(|_| BotError::RenderTimeout(self.render_timeout.as_secs()))??;

        // Timestamped so re-generating the same snapshot never overwrites
        let document = format!("{}_{}.pdf", snapshot.label, chrono::Utc::now().timestamp());
        self.store.write(Category::Document, &document, &pdf).await?;

        info!(label = %snapshot.label, pages = page_count, document, "Document generated");
        Ok(GenerateOutcome {
            pages: page_count,
            document,
        })
    }

    // -------------------------------------------------------------------------
    // Archive
    // -------------------------------------------------------------------------

    async fn browse(&self) -> Reply {
        match self.store.list(Category::JsonExport).await {
            Ok(names) if names.is_empty() => {
                Reply::with_menu("Archive is empty - nothing saved yet.", main_menu())
            }
            Ok(names) => {
                let mut menu: Vec<MenuButton> = names
                    .into_iter()
                    .take(ARCHIVE_BROWSE_LIMIT)
                    .map(|name| {
                        let label = name.trim_end_matches(".json").to_string();
                        MenuButton::new(label, MenuAction::Open(name))
                    })
                    .collect();
                menu.push(MenuButton::new("Main menu", MenuAction::MainMenu));
                Reply::with_menu("Pick a snapshot to load:", menu)
            }
            Err(err) => {
                warn!(error = %err, "Archive listing failed");
                Reply::with_menu(BotError::from(err).user_message(), main_menu())
            }
        }
    }

    async fn load(&self, user: UserId, name: &str) -> Reply {
        match self.load_inner(name).await {
            Ok(snapshot) => {
                info!(label = %snapshot.label, "Snapshot restored from archive");
                let text = format!(
                    "Loaded '{}': {} item(s), {} label(s). Generate when ready.",
                    snapshot.label,
                    snapshot.item_count(),
                    snapshot.label_count()
                );
                self.registry
                    .with_session(user, |session| session.restore_snapshot(snapshot));
                Reply::with_menu(text, main_menu())
            }
            Err(err) => {
                warn!(error = %err, name, "Archive load failed");
                Reply::with_menu(err.user_message(), main_menu())
            }
        }
    }

    async fn load_inner(&self, name: &str) -> Result<Snapshot, BotError> {
        let bytes = self.store.read(Category::JsonExport, name).await?;
        Ok(decode_snapshot(&bytes)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
