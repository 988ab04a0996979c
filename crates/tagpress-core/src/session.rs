//! # Session State Machine
//!
//! Per-user finite-state controller governing which input is expected next
//! and what queue mutation it triggers.
//!
//! ## State Diagram
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session State Machine                              │
//! │                                                                         │
//! │  AwaitingName ──text──► Main ◄──────────────────────── (MainMenu from  │
//! │                          │                               any state,     │
//! │            AddData       │        Save (queue non-empty)  clears all)   │
//! │                ┌─────────┴────────────┐                                 │
//! │                ▼                      ▼                                 │
//! │      AwaitingLabelInput      AwaitingSnapshotName                       │
//! │          │        ▲                   │ text → Save effect              │
//! │    block │        │ quantity         ▼ (commit on write success)       │
//! │          ▼        │              PostSnapshot ◄── restore (archive)     │
//! │      AwaitingQuantity                 │ Generate → Generate effect      │
//! │                                       ▼ (finish on render success)     │
//! │                                  PostGenerate                           │
//! │                                                                         │
//! │  Main/PostGenerate ──BrowseArchive──► BrowsingArchive ──Open──► load   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Effect Protocol
//! `Session::apply` is a pure transition function: it never performs I/O.
//! Transitions that need the outside world (snapshot persistence, archive
//! listing, generation) return a [`Step`] effect. The caller executes the
//! effect and, on success, commits the transition via [`Session::commit_snapshot`],
//! [`Session::finish_generation`], or [`Session::restore_snapshot`]. On
//! failure the session state is untouched, so the triggering event can be
//! retried without re-entering data.
//!
//! The save-before-generate gate is deliberate: generation always operates
//! on an immutable, named snapshot, never on the live mutable queue.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::parser::{parse_quantity, parse_record, sanitize_label};
use crate::types::{LineItem, ParsedRecord, Snapshot};

// =============================================================================
// States, Events, Replies
// =============================================================================

/// The session's current conversational state.
///
/// No terminal state: the machine cycles for the life of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Fresh session; the next text message is the user's display name.
    AwaitingName,
    /// Top-level menu; waiting for a menu action.
    Main,
    /// The next text message is a record block (name / specs / price).
    AwaitingLabelInput,
    /// The next text message is the print-run count for the pending record.
    AwaitingQuantity,
    /// The next text message names the snapshot about to be saved.
    AwaitingSnapshotName,
    /// A snapshot is committed; generation is available.
    PostSnapshot,
    /// Generation completed for the current snapshot.
    PostGenerate,
    /// Archive listing was shown; an Open action selects a snapshot.
    BrowsingArchive,
}

/// A menu trigger, carried by buttons and inbound action events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "arg")]
pub enum MenuAction {
    /// Start entering record blocks.
    AddData,
    /// Freeze the queue into a named snapshot.
    Save,
    /// Render the committed snapshot to a printable document.
    Generate,
    /// List previously saved snapshots.
    BrowseArchive,
    /// Return to the top-level menu, clearing queue and snapshot.
    MainMenu,
    /// Open an archived snapshot by blob name.
    Open(String),
}

/// An inbound event from the chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Session (re-)initialization.
    Start,
    /// A free-text message.
    Text(String),
    /// A menu trigger.
    Action(MenuAction),
}

/// One selectable trigger attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButton {
    pub label: String,
    pub action: MenuAction,
}

impl MenuButton {
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        MenuButton {
            label: label.into(),
            action,
        }
    }
}

/// An outbound reply: plain text, optionally paired with selectable
/// triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub menu: Option<Vec<MenuButton>>,
}

impl Reply {
    /// A plain-text reply without a menu.
    pub fn text(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            menu: None,
        }
    }

    /// A reply with a menu of selectable triggers.
    pub fn with_menu(text: impl Into<String>, menu: Vec<MenuButton>) -> Self {
        Reply {
            text: text.into(),
            menu: Some(menu),
        }
    }
}

/// The standard top-level menu.
pub fn main_menu() -> Vec<MenuButton> {
    vec![
        MenuButton::new("Add data", MenuAction::AddData),
        MenuButton::new("Save snapshot", MenuAction::Save),
        MenuButton::new("Generate PDF", MenuAction::Generate),
        MenuButton::new("Browse archive", MenuAction::BrowseArchive),
    ]
}

// =============================================================================
// Step (Transition Outcome)
// =============================================================================

/// The outcome of applying one event.
///
/// Either an immediate reply, or an effect the caller must execute before
/// committing the corresponding transition:
///
/// | Effect          | On success, caller invokes        | New state      |
/// |-----------------|-----------------------------------|----------------|
/// | `Save`          | [`Session::commit_snapshot`]      | `PostSnapshot` |
/// | `Generate`      | [`Session::finish_generation`]    | `PostGenerate` |
/// | `Load`          | [`Session::restore_snapshot`]     | `PostSnapshot` |
/// | `BrowseArchive` | (reply built from store listing)  | already moved  |
///
/// On effect failure the caller reports it and leaves the session as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// No I/O needed; deliver this reply.
    Reply(Reply),
    /// Persist this freshly taken snapshot.
    Save(Snapshot),
    /// Export and render this committed snapshot.
    Generate(Snapshot),
    /// List archived snapshot blobs and offer them for selection.
    BrowseArchive,
    /// Read and decode the named snapshot blob.
    Load(String),
}

// =============================================================================
// Session
// =============================================================================

/// One user's conversation state.
///
/// ## Ownership
/// Exactly one session exists per user identity; the session exclusively
/// owns its queue and pending record. No data is shared across sessions,
/// so distinct sessions need no coordination.
#[derive(Debug, Clone)]
pub struct Session {
    display_name: Option<String>,
    state: SessionState,
    queue: Vec<LineItem>,
    snapshot: Option<Snapshot>,
    pending: Option<ParsedRecord>,
}

impl Session {
    /// Creates a fresh session awaiting the user's name.
    pub fn new() -> Self {
        Session {
            display_name: None,
            state: SessionState::AwaitingName,
            queue: Vec::new(),
            snapshot: None,
            pending: None,
        }
    }

    /// Current state (for dispatch decisions and tests).
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The user's display name, once introduced.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// The live mutable queue.
    pub fn queue(&self) -> &[LineItem] {
        &self.queue
    }

    /// The committed snapshot, if any.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Applies one inbound event, returning the reply or effect.
    ///
    /// Pure: no I/O ever happens here.
    pub fn apply(&mut self, event: Event) -> Step {
        match event {
            Event::Start => {
                self.clear_work();
                self.display_name = None;
                self.state = SessionState::AwaitingName;
                Step::Reply(Reply::text(
                    "Hello! Before we start, what should I call you?",
                ))
            }
            Event::Text(text) => self.apply_text(&text),
            Event::Action(action) => self.apply_action(action),
        }
    }

    /// Commits a successfully persisted snapshot.
    pub fn commit_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
        self.state = SessionState::PostSnapshot;
    }

    /// Marks generation of the current snapshot as completed.
    pub fn finish_generation(&mut self) {
        self.state = SessionState::PostGenerate;
    }

    /// Restores a snapshot loaded from the archive, enabling re-generation
    /// of historical data without re-entering it.
    pub fn restore_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
        self.state = SessionState::PostSnapshot;
    }

    // -------------------------------------------------------------------------
    // Text handling
    // -------------------------------------------------------------------------

    fn apply_text(&mut self, text: &str) -> Step {
        match self.state {
            SessionState::AwaitingName => {
                let name = text.trim();
                if name.is_empty() {
                    return Step::Reply(Reply::text(
                        "A blank name won't do - what should I call you?",
                    ));
                }
                self.display_name = Some(name.to_string());
                self.clear_work();
                self.state = SessionState::Main;
                Step::Reply(Reply::with_menu(
                    format!("Nice to meet you, {name}! Pick an action to get started."),
                    main_menu(),
                ))
            }

            SessionState::AwaitingLabelInput => match parse_record(text) {
                Ok(record) => {
                    let prompt = format!("How many labels for {}?", record.name);
                    self.pending = Some(record);
                    self.state = SessionState::AwaitingQuantity;
                    Step::Reply(Reply::text(prompt))
                }
                // Recoverable in place: re-prompt, no state change
                Err(err) => Step::Reply(Reply::text(format!(
                    "{err}. Send the product name on the first line, spec lines in \
                     between, and the price on the last line."
                ))),
            },

            SessionState::AwaitingQuantity => {
                let quantity = parse_quantity(text);
                match self.pending.take() {
                    Some(record) => {
                        let item = record.with_quantity(quantity);
                        let added = format!("Added {} x{}.", item.name, item.quantity);
                        self.queue.push(item);
                        self.state = SessionState::AwaitingLabelInput;
                        Step::Reply(Reply::with_menu(
                            format!(
                                "{added} Queue: {}. Send the next block, or save the queue.",
                                self.queue.len()
                            ),
                            main_menu(),
                        ))
                    }
                    None => {
                        self.state = SessionState::AwaitingLabelInput;
                        Step::Reply(Reply::text(
                            "Send the product block first (name, specs, price).",
                        ))
                    }
                }
            }

            SessionState::AwaitingSnapshotName => {
                let label = sanitize_label(text);
                let by = self.display_name.as_deref().unwrap_or("unknown");
                // Transition to PostSnapshot happens in commit_snapshot,
                // only after the blob write succeeds
                Step::Save(Snapshot::take(by, &label, &self.queue))
            }

            SessionState::Main
            | SessionState::PostSnapshot
            | SessionState::PostGenerate
            | SessionState::BrowsingArchive => {
                Step::Reply(Reply::with_menu("Pick an action from the menu.", main_menu()))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Action handling
    // -------------------------------------------------------------------------

    fn apply_action(&mut self, action: MenuAction) -> Step {
        // Every action requires an introduced user
        if self.display_name.is_none() {
            self.state = SessionState::AwaitingName;
            return Step::Reply(Reply::text(
                "I don't know you yet - tell me your name first.",
            ));
        }

        match action {
            MenuAction::MainMenu => {
                self.clear_work();
                self.state = SessionState::Main;
                Step::Reply(Reply::with_menu(
                    "Back at the main menu. Queue and snapshot cleared.",
                    main_menu(),
                ))
            }

            MenuAction::AddData => {
                self.pending = None;
                self.state = SessionState::AwaitingLabelInput;
                Step::Reply(Reply::text(
                    "Send the product block: name on the first line, spec lines in \
                     between, price on the last line.",
                ))
            }

            MenuAction::Save => {
                if self.queue.is_empty() {
                    // Reported, not fatal: guide the user to add data first
                    return Step::Reply(Reply::with_menu(
                        format!("{}. Add data first.", CoreError::EmptyQueue),
                        main_menu(),
                    ));
                }
                self.state = SessionState::AwaitingSnapshotName;
                Step::Reply(Reply::text("What should this snapshot be called?"))
            }

            MenuAction::Generate => match &self.snapshot {
                Some(snapshot) => Step::Generate(snapshot.clone()),
                // Reported, session state unchanged
                None => Step::Reply(Reply::with_menu(
                    format!("{}.", CoreError::MissingSnapshot),
                    main_menu(),
                )),
            },

            MenuAction::BrowseArchive => {
                self.state = SessionState::BrowsingArchive;
                Step::BrowseArchive
            }

            MenuAction::Open(name) => {
                if self.state == SessionState::BrowsingArchive {
                    Step::Load(name)
                } else {
                    Step::Reply(Reply::with_menu(
                        "Browse the archive first to pick a snapshot.",
                        main_menu(),
                    ))
                }
            }
        }
    }

    /// Clears queue, snapshot, and pending record (top-level menu reset).
    fn clear_work(&mut self) {
        self.queue.clear();
        self.snapshot = None;
        self.pending = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Drives a fresh session through start + introduction.
    fn introduced() -> Session {
        let mut session = Session::new();
        session.apply(Event::Start);
        session.apply(Event::Text("Budi".to_string()));
        assert_eq!(session.state(), SessionState::Main);
        session
    }

    /// Adds one record block + quantity via the normal flow.
    fn add_item(session: &mut Session, block: &str, quantity: &str) {
        session.apply(Event::Action(MenuAction::AddData));
        session.apply(Event::Text(block.to_string()));
        assert_eq!(session.state(), SessionState::AwaitingQuantity);
        session.apply(Event::Text(quantity.to_string()));
        assert_eq!(session.state(), SessionState::AwaitingLabelInput);
    }

    #[test]
    fn test_start_asks_for_name() {
        let mut session = Session::new();
        let step = session.apply(Event::Start);
        assert_eq!(session.state(), SessionState::AwaitingName);
        assert!(matches!(step, Step::Reply(r) if r.text.contains("call you")));
    }

    #[test]
    fn test_introduction_moves_to_main() {
        let mut session = Session::new();
        session.apply(Event::Start);
        let step = session.apply(Event::Text("  Budi  ".to_string()));

        assert_eq!(session.state(), SessionState::Main);
        assert_eq!(session.display_name(), Some("Budi"));
        assert!(matches!(step, Step::Reply(r) if r.text.contains("Budi") && r.menu.is_some()));
    }

    #[test]
    fn test_blank_name_reprompts() {
        let mut session = Session::new();
        session.apply(Event::Start);
        session.apply(Event::Text("   ".to_string()));
        assert_eq!(session.state(), SessionState::AwaitingName);
    }

    #[test]
    fn test_action_without_introduction_is_gated() {
        let mut session = Session::new();
        let step = session.apply(Event::Action(MenuAction::AddData));
        assert_eq!(session.state(), SessionState::AwaitingName);
        assert!(matches!(step, Step::Reply(r) if r.text.contains("name")));
    }

    #[test]
    fn test_two_step_add_produces_line_item() {
        let mut session = introduced();
        add_item(&mut session, "LaptopX\nRAM 8GB\nSSD 256GB\n4500000", "3");

        assert_eq!(session.queue().len(), 1);
        let item = &session.queue()[0];
        assert_eq!(item.name, "LaptopX");
        assert_eq!(item.description, "RAM 8GB\nSSD 256GB");
        assert_eq!(item.unit_price.amount(), 4_500_000);
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_malformed_block_reprompts_in_place() {
        let mut session = introduced();
        session.apply(Event::Action(MenuAction::AddData));

        let step = session.apply(Event::Text("just one line".to_string()));
        assert_eq!(session.state(), SessionState::AwaitingLabelInput);
        assert!(matches!(step, Step::Reply(r) if r.text.contains("Malformed record")));

        // The flow recovers with a well-formed block
        session.apply(Event::Text("Mouse\n150000".to_string()));
        assert_eq!(session.state(), SessionState::AwaitingQuantity);
    }

    #[test]
    fn test_nonsense_quantity_defaults_to_one() {
        let mut session = introduced();
        add_item(&mut session, "Mouse\n150000", "lots");
        assert_eq!(session.queue()[0].quantity, 1);
    }

    #[test]
    fn test_save_with_empty_queue_is_reported() {
        let mut session = introduced();
        let step = session.apply(Event::Action(MenuAction::Save));

        assert_eq!(session.state(), SessionState::Main);
        assert!(matches!(step, Step::Reply(r) if r.text.contains("empty")));
    }

    #[test]
    fn test_save_flow_emits_save_effect_and_commits() {
        let mut session = introduced();
        add_item(&mut session, "Mouse\n150000", "2");

        session.apply(Event::Action(MenuAction::Save));
        assert_eq!(session.state(), SessionState::AwaitingSnapshotName);

        let step = session.apply(Event::Text("stok april".to_string()));
        let snapshot = match step {
            Step::Save(s) => s,
            other => panic!("expected Save effect, got {:?}", other),
        };
        assert_eq!(snapshot.label, "stok_april");
        assert_eq!(snapshot.generated_by, "Budi");
        assert_eq!(snapshot.item_count(), 1);

        // Not committed yet: a failed write must leave the state unchanged
        assert_eq!(session.state(), SessionState::AwaitingSnapshotName);
        assert!(session.snapshot().is_none());

        session.commit_snapshot(snapshot);
        assert_eq!(session.state(), SessionState::PostSnapshot);
        assert!(session.snapshot().is_some());
    }

    #[test]
    fn test_generate_without_snapshot_leaves_state_unchanged() {
        let mut session = introduced();
        let step = session.apply(Event::Action(MenuAction::Generate));

        assert_eq!(session.state(), SessionState::Main);
        assert!(session.snapshot().is_none());
        assert!(matches!(step, Step::Reply(r) if r.text.contains("save before generating")));
    }

    #[test]
    fn test_generate_emits_effect_and_stays_pre_generation() {
        let mut session = introduced();
        add_item(&mut session, "Mouse\n150000", "1");
        session.apply(Event::Action(MenuAction::Save));
        let step = session.apply(Event::Text("x".to_string()));
        let snapshot = match step {
            Step::Save(s) => s,
            other => panic!("expected Save effect, got {:?}", other),
        };
        session.commit_snapshot(snapshot.clone());

        let step = session.apply(Event::Action(MenuAction::Generate));
        assert_eq!(step, Step::Generate(snapshot));

        // While the render is outstanding the session stays PostSnapshot
        assert_eq!(session.state(), SessionState::PostSnapshot);

        session.finish_generation();
        assert_eq!(session.state(), SessionState::PostGenerate);
    }

    #[test]
    fn test_snapshot_is_immune_to_later_queue_edits() {
        let mut session = introduced();
        add_item(&mut session, "Mouse\n150000", "1");
        session.apply(Event::Action(MenuAction::Save));
        if let Step::Save(s) = session.apply(Event::Text("frozen".to_string())) {
            session.commit_snapshot(s);
        }

        // Keep adding to the live queue after the snapshot was committed
        add_item(&mut session, "Keyboard\n350000", "4");

        assert_eq!(session.queue().len(), 2);
        assert_eq!(session.snapshot().unwrap().item_count(), 1);
    }

    #[test]
    fn test_main_menu_clears_everything() {
        let mut session = introduced();
        add_item(&mut session, "Mouse\n150000", "1");
        session.apply(Event::Action(MenuAction::Save));
        if let Step::Save(s) = session.apply(Event::Text("x".to_string())) {
            session.commit_snapshot(s);
        }

        session.apply(Event::Action(MenuAction::MainMenu));
        assert_eq!(session.state(), SessionState::Main);
        assert!(session.queue().is_empty());
        assert!(session.snapshot().is_none());
        // Display name survives the reset
        assert_eq!(session.display_name(), Some("Budi"));
    }

    #[test]
    fn test_browse_and_open_flow() {
        let mut session = introduced();

        let step = session.apply(Event::Action(MenuAction::BrowseArchive));
        assert_eq!(step, Step::BrowseArchive);
        assert_eq!(session.state(), SessionState::BrowsingArchive);

        let step = session.apply(Event::Action(MenuAction::Open("old.json".to_string())));
        assert_eq!(step, Step::Load("old.json".to_string()));

        let snapshot = Snapshot::take("Budi", "old", &[]);
        session.restore_snapshot(snapshot);
        assert_eq!(session.state(), SessionState::PostSnapshot);
    }

    #[test]
    fn test_open_outside_archive_is_rejected() {
        let mut session = introduced();
        let step = session.apply(Event::Action(MenuAction::Open("old.json".to_string())));
        assert!(matches!(step, Step::Reply(_)));
        assert_eq!(session.state(), SessionState::Main);
    }

    #[test]
    fn test_start_reinitializes() {
        let mut session = introduced();
        add_item(&mut session, "Mouse\n150000", "1");

        session.apply(Event::Start);
        assert_eq!(session.state(), SessionState::AwaitingName);
        assert!(session.queue().is_empty());
        assert!(session.display_name().is_none());
    }
}
