// Manager scenario tests against an in-memory host

use super::*;
use crate::config::{KeyCode, QuicksaveSettings};
use crate::error::StoreError;
use crate::host::{ConsoleHost, HostMode, IdentityProvider, LoadApplier, Notifier};
use crate::store::{FileSaveStore, META_SAVE_NAME, SaveMetadata, SaveStore};

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, UNIX_EPOCH};

struct FakeHost {
    /// Newest first, like a real save list
    records: Vec<SaveFileRecord>,
    list_fails: bool,
    list_calls: Cell<usize>,
    save_fails: bool,
    load_overrides: HashMap<String, LoadResult>,
    lost: Vec<String>,
    identity: String,
    running: bool,
    safe: bool,
    sub_activity: bool,
    stubborn_sub_activity: bool,
    left_sub_activity: bool,
    clock: u64,
    saved: Vec<String>,
    applied: Vec<String>,
    messages: Vec<(String, Severity)>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            list_fails: false,
            list_calls: Cell::new(0),
            save_fails: false,
            load_overrides: HashMap::new(),
            lost: Vec::new(),
            identity: String::new(),
            running: true,
            safe: true,
            sub_activity: false,
            stubborn_sub_activity: false,
            left_sub_activity: false,
            clock: 100,
            saved: Vec::new(),
            applied: Vec::new(),
            messages: Vec::new(),
        }
    }
}

impl FakeHost {
    fn with_identity(identity: &str) -> Self {
        Self {
            identity: identity.to_string(),
            ..Self::default()
        }
    }

    /// Add an existing save, newer than everything already listed
    fn existing(mut self, name: &str) -> Self {
        self.push_record(name);
        self
    }

    fn push_record(&mut self, name: &str) {
        self.clock += 1;
        self.records.retain(|r| r.name != name);
        self.records.insert(
            0,
            SaveFileRecord::new(name, UNIX_EPOCH + Duration::from_secs(self.clock)),
        );
    }

    fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|(m, _)| m.as_str()).collect()
    }
}

impl SaveStore for FakeHost {
    fn list_save_records(&self) -> Result<Vec<SaveFileRecord>, StoreError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.list_fails {
            return Err(StoreError::Listing("save folder unreadable".to_string()));
        }
        Ok(self.records.clone())
    }

    fn save(&mut self, name: &str) -> Result<(), StoreError> {
        if self.save_fails {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        self.push_record(name);
        self.saved.push(name.to_string());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<LoadResult, StoreError> {
        if let Some(result) = self.load_overrides.get(name) {
            return Ok(result.clone());
        }
        if self.lost.iter().any(|l| l == name) || !self.records.iter().any(|r| r.name == name) {
            return Err(StoreError::NotFound(name.to_string()));
        }
        let mut metadata = SaveMetadata::default();
        metadata.insert(META_SAVE_NAME, name);
        Ok(LoadResult::success(metadata))
    }
}

impl IdentityProvider for FakeHost {
    fn current_identity_label(&self) -> String {
        self.identity.clone()
    }
}

impl HostMode for FakeHost {
    fn is_safe_to_apply_load(&self) -> bool {
        self.safe
    }

    fn has_foreground_sub_activity(&self) -> bool {
        self.sub_activity
    }

    fn supports_loading_now(&self) -> bool {
        self.running
    }

    fn leave_foreground_sub_activity(&mut self) {
        self.left_sub_activity = true;
        if !self.stubborn_sub_activity {
            self.sub_activity = false;
        }
    }
}

impl LoadApplier for FakeHost {
    fn apply_load(&mut self, save: &LoadedSave) -> Result<(), String> {
        self.applied.push(save.save_name.clone());
        Ok(())
    }
}

impl Notifier for FakeHost {
    fn display(&mut self, message: &str, severity: Severity) {
        self.messages.push((message.to_string(), severity));
    }
}

fn config(max_slots: u32, per_identity: bool) -> QuicksaveConfig {
    QuicksaveConfig {
        max_slots,
        prefix: "quicksave_".to_string(),
        per_identity_saves: per_identity,
        quickload_key: KeyCode::F10,
    }
}

fn manager(max_slots: u32, per_identity: bool) -> QuicksaveManager {
    QuicksaveManager::new(Box::new(config(max_slots, per_identity)))
}

// ── saving ──────────────────────────────────────────────────────

#[test]
fn generating_a_name_does_not_advance() {
    let mut m = manager(3, false);
    let host = FakeHost::default();

    assert_eq!(m.generate_next_save_name(&host), "quicksave_001");
    assert_eq!(m.generate_next_save_name(&host), "quicksave_001");
}

#[test]
fn save_completion_advances_and_notifies() {
    let mut m = manager(3, false);
    let mut host = FakeHost::default();

    assert_eq!(m.generate_next_save_name(&host), "quicksave_001");
    m.on_save_completed(&mut host);
    assert_eq!(m.generate_next_save_name(&host), "quicksave_002");
    assert_eq!(host.messages, vec![(MSG_QUICKSAVED.to_string(), Severity::Info)]);
}

#[test]
fn quicksaves_rotate_through_slots() {
    let mut m = manager(3, false);
    let mut host = FakeHost::default();

    let names: Vec<String> = (0..5).map(|_| m.quicksave(&mut host).unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "quicksave_001",
            "quicksave_002",
            "quicksave_003",
            "quicksave_001",
            "quicksave_002"
        ]
    );
    assert_eq!(host.records.len(), 3);
}

#[test]
fn single_slot_overwrites_one_name() {
    let mut m = manager(1, false);
    let mut host = FakeHost::default();

    assert_eq!(m.quicksave(&mut host).unwrap(), "quicksave_");
    assert_eq!(m.quicksave(&mut host).unwrap(), "quicksave_");
}

#[test]
fn failed_save_does_not_advance() {
    let mut m = manager(3, false);
    let mut host = FakeHost {
        save_fails: true,
        ..FakeHost::default()
    };

    assert!(matches!(
        m.quicksave(&mut host),
        Err(QuicksaveError::StoreUnavailable(_))
    ));
    assert_eq!(host.texts(), vec!["Quicksave failed: save store I/O: disk full"]);

    host.save_fails = false;
    assert_eq!(m.quicksave(&mut host).unwrap(), "quicksave_001");
}

#[test]
fn first_name_continues_after_latest_existing_save() {
    let mut m = manager(5, false);
    let host = FakeHost::default()
        .existing("quicksave_001")
        .existing("quicksave_002");

    assert_eq!(m.generate_next_save_name(&host), "quicksave_003");
}

#[test]
fn rotation_is_derived_once_per_session() {
    let mut m = manager(5, false);
    let mut host = FakeHost::default().existing("quicksave_004");

    assert_eq!(m.generate_next_save_name(&host), "quicksave_005");
    assert_eq!(m.generate_next_save_name(&host), "quicksave_005");
    assert_eq!(host.list_calls.get(), 1);

    // Saves written by someone else are not picked up mid-session
    host.push_record("quicksave_001");
    assert_eq!(m.generate_next_save_name(&host), "quicksave_005");
}

#[test]
fn latest_in_last_slot_wraps_to_first() {
    let mut m = manager(3, false);
    let host = FakeHost::default().existing("quicksave_003");

    assert_eq!(m.generate_next_save_name(&host), "quicksave_001");
}

#[test]
fn unreadable_store_starts_at_slot_one() {
    let mut m = manager(3, false);
    let host = FakeHost {
        list_fails: true,
        ..FakeHost::default()
    };

    assert_eq!(m.generate_next_save_name(&host), "quicksave_001");
    assert!(host.messages.is_empty());
}

#[test]
fn identity_scoped_names() {
    let mut m = manager(3, true);
    let mut host = FakeHost::with_identity("Rolf Clan");

    m.quicksave(&mut host).unwrap();
    assert_eq!(m.generate_next_save_name(&host), "Rolf Clan quicksave_002");
}

#[test]
fn other_identities_saves_do_not_count() {
    let mut m = manager(3, true);
    let host = FakeHost::with_identity("Rolf Clan").existing("Ira Clan quicksave_002");

    assert_eq!(m.generate_next_save_name(&host), "Rolf Clan quicksave_001");
}

#[test]
fn identity_with_path_separator_is_not_saved_outside_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let saves = dir.path().join("saves");
    let mut host = ConsoleHost::new(FileSaveStore::new(&saves), "../Rolf");
    let mut m = manager(3, true);

    assert!(matches!(
        m.quicksave(&mut host),
        Err(QuicksaveError::StoreUnavailable(StoreError::InvalidName(_)))
    ));
    assert!(!dir.path().join("Rolf quicksave_001.sav").exists());
    assert_eq!(m.counter().next_index(), 1);
}

#[test]
fn unusable_prefix_still_saves_a_loadable_quicksave() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = ConsoleHost::new(FileSaveStore::new(dir.path()), "");
    let settings = QuicksaveSettings {
        max_quicksaves: 1,
        quicksave_prefix: "!!!".to_string(),
        ..QuicksaveSettings::default()
    };
    let mut m = QuicksaveManager::new(Box::new(QuicksaveConfig::from_settings(&settings)));

    assert_eq!(m.quicksave(&mut host).unwrap(), "quicksave_");
    assert!(matches!(
        m.request_quickload(&mut host),
        QuickloadOutcome::Pending(ref n) if n == "quicksave_"
    ));
}

// ── session and identity ────────────────────────────────────────

#[test]
fn identity_change_restarts_numbering_for_new_identity() {
    let mut m = manager(5, true);
    let _session = m.attach();
    let mut host = FakeHost::with_identity("Rolf Clan").existing("Ira Clan quicksave_003");

    m.quicksave(&mut host).unwrap();
    m.quicksave(&mut host).unwrap();
    assert_eq!(m.counter().next_index(), 3);

    host.identity = "Ira Clan".to_string();
    m.on_identity_changed();
    assert_eq!(m.counter().next_index(), 1);
    assert_eq!(m.generate_next_save_name(&host), "Ira Clan quicksave_004");
}

#[test]
fn identity_change_outside_session_is_ignored() {
    let mut m = manager(5, false);
    let mut host = FakeHost::default();
    m.quicksave(&mut host).unwrap();

    m.on_identity_changed();
    assert_eq!(m.counter().next_index(), 2);
}

#[test]
fn attach_rederives_rotation() {
    let mut m = manager(5, false);
    let mut host = FakeHost::default();
    m.quicksave(&mut host).unwrap();

    let session = m.attach();
    host.push_record("quicksave_004");
    assert_eq!(m.generate_next_save_name(&host), "quicksave_005");
    m.detach(session);
}

#[test]
fn detach_drops_pending_load() {
    let mut m = manager(3, false);
    let session = m.attach();
    let mut host = FakeHost {
        safe: false,
        ..FakeHost::default().existing("quicksave_001")
    };

    assert!(matches!(m.request_quickload(&mut host), QuickloadOutcome::Pending(_)));
    m.detach(session);
    assert!(!m.is_attached());
    assert!(m.pending_load().is_none());

    host.safe = true;
    assert!(matches!(m.on_tick(&mut host), TickOutcome::Idle));
}

#[test]
fn stale_subscription_detach_is_ignored() {
    let mut m = manager(3, false);
    let old = m.attach();
    let current = m.attach();
    assert_ne!(old.id(), current.id());

    m.detach(old);
    assert!(m.is_attached());
    m.detach(current);
    assert!(!m.is_attached());
}

// ── loading ─────────────────────────────────────────────────────

#[test]
fn quickload_unavailable_skips_store() {
    let mut m = manager(3, false);
    let mut host = FakeHost {
        running: false,
        ..FakeHost::default().existing("quicksave_001")
    };

    assert!(matches!(m.request_quickload(&mut host), QuickloadOutcome::NotAvailable));
    assert_eq!(host.list_calls.get(), 0);
    assert_eq!(
        host.messages,
        vec![(MSG_NOT_AVAILABLE.to_string(), Severity::Warning)]
    );
}

#[test]
fn quickload_without_saves_reports_none() {
    let mut m = manager(3, false);
    let mut host = FakeHost::default().existing("autosave");

    assert!(matches!(m.request_quickload(&mut host), QuickloadOutcome::NoQuicksaves));
    assert_eq!(host.texts(), vec![MSG_NO_QUICKSAVES]);
}

#[test]
fn quickload_listing_failure_reads_as_no_quicksaves() {
    let mut m = manager(3, false);
    let mut host = FakeHost::default();
    m.quicksave(&mut host).unwrap();
    host.messages.clear();
    host.list_fails = true;

    assert!(matches!(m.request_quickload(&mut host), QuickloadOutcome::NoQuicksaves));
    assert_eq!(
        host.texts(),
        vec![
            "Failed to quickload: cannot list saves: save folder unreadable",
            MSG_NO_QUICKSAVES
        ]
    );
    assert_eq!(host.messages[0].1, Severity::Error);
    assert_eq!(m.counter().next_index(), 2);
}

#[test]
fn quickload_applies_latest_on_safe_tick() {
    let mut m = manager(5, false);
    let mut host = FakeHost {
        safe: false,
        ..FakeHost::default()
            .existing("quicksave_003")
            .existing("quicksave_001")
            .existing("other")
    };

    assert!(matches!(
        m.request_quickload(&mut host),
        QuickloadOutcome::Pending(ref n) if n == "quicksave_001"
    ));
    assert!(matches!(m.on_tick(&mut host), TickOutcome::Waiting));

    host.safe = true;
    assert!(matches!(m.on_tick(&mut host), TickOutcome::Applied(ref n) if n == "quicksave_001"));
    assert_eq!(host.applied, vec!["quicksave_001".to_string()]);
    assert!(matches!(m.on_tick(&mut host), TickOutcome::Idle));
}

#[test]
fn quickload_leaves_running_sub_activity() {
    let mut m = manager(3, false);
    let mut host = FakeHost {
        sub_activity: true,
        ..FakeHost::default().existing("quicksave_002")
    };

    assert!(matches!(m.request_quickload(&mut host), QuickloadOutcome::Pending(_)));
    assert!(host.left_sub_activity);
    assert!(matches!(m.on_tick(&mut host), TickOutcome::Applied(_)));
}

#[test]
fn sub_activity_still_running_on_tick_is_a_conflict() {
    let mut m = manager(3, false);
    let mut host = FakeHost {
        sub_activity: true,
        stubborn_sub_activity: true,
        ..FakeHost::default().existing("quicksave_002")
    };

    m.request_quickload(&mut host);
    assert!(matches!(
        m.on_tick(&mut host),
        TickOutcome::Failed(QuicksaveError::UnsafeApplyConflict)
    ));
    assert!(host.applied.is_empty());
    assert!(matches!(m.on_tick(&mut host), TickOutcome::Idle));
}

#[test]
fn unsuccessful_load_reports_every_message() {
    let mut m = manager(3, false);
    let mut host = FakeHost::default().existing("quicksave_001");
    host.load_overrides.insert(
        "quicksave_001".to_string(),
        LoadResult::failure(vec![
            "Missing module: Sandbox".to_string(),
            "Save is from a newer version".to_string(),
        ]),
    );

    let outcome = m.request_quickload(&mut host);
    assert!(matches!(
        outcome,
        QuickloadOutcome::Failed(QuicksaveError::LoadUnsuccessful(ref e)) if e.len() == 2
    ));
    assert_eq!(
        host.messages,
        vec![
            (MSG_UNABLE_TO_LOAD.to_string(), Severity::Warning),
            ("Missing module: Sandbox".to_string(), Severity::Error),
            ("Save is from a newer version".to_string(), Severity::Error),
        ]
    );
    assert!(m.pending_load().is_none());
    assert!(matches!(m.on_tick(&mut host), TickOutcome::Idle));
}

#[test]
fn new_request_replaces_stale_pending_load() {
    let mut m = manager(3, false);
    let mut host = FakeHost {
        safe: false,
        ..FakeHost::default().existing("quicksave_001")
    };
    m.request_quickload(&mut host);

    host.push_record("quicksave_002");
    m.request_quickload(&mut host);

    host.safe = true;
    m.on_tick(&mut host);
    assert_eq!(host.applied, vec!["quicksave_002".to_string()]);
}

#[test]
fn failed_request_clears_stale_pending_load() {
    let mut m = manager(3, false);
    let mut host = FakeHost {
        safe: false,
        ..FakeHost::default().existing("quicksave_001")
    };
    m.request_quickload(&mut host);

    host.records.clear();
    assert!(matches!(m.request_quickload(&mut host), QuickloadOutcome::NoQuicksaves));

    host.safe = true;
    assert!(matches!(m.on_tick(&mut host), TickOutcome::Idle));
    assert!(host.applied.is_empty());
}

#[test]
fn unsuccessful_load_without_messages_gets_generic_reason() {
    let mut m = manager(3, false);
    let mut host = FakeHost::default().existing("quicksave_002");
    host.load_overrides
        .insert("quicksave_002".to_string(), LoadResult::failure(Vec::new()));

    assert!(matches!(m.request_quickload(&mut host), QuickloadOutcome::Failed(_)));
    assert_eq!(
        host.texts(),
        vec![MSG_UNABLE_TO_LOAD, "Save 'quicksave_002' could not be loaded."]
    );
}

#[test]
fn save_vanishing_before_load_is_reported() {
    let mut m = manager(3, false);
    let mut host = FakeHost::default().existing("quicksave_001");
    // Listed, but gone from the store by the time it is read
    host.lost.push("quicksave_001".to_string());

    assert!(matches!(m.request_quickload(&mut host), QuickloadOutcome::NoQuicksaves));
    assert_eq!(
        host.texts(),
        vec![
            "Failed to quickload: save 'quicksave_001' not found",
            MSG_NO_QUICKSAVES
        ]
    );
    assert!(m.pending_load().is_none());
}

#[test]
fn quickload_key_triggers_request() {
    let mut m = manager(3, false);
    let mut host = FakeHost::default().existing("quicksave_001");

    assert!(m.on_key_pressed(KeyCode::F9, &mut host).is_none());
    assert_eq!(host.list_calls.get(), 0);
    assert!(matches!(
        m.on_key_pressed(KeyCode::F10, &mut host),
        Some(QuickloadOutcome::Pending(_))
    ));
}

// ── configuration ───────────────────────────────────────────────

#[test]
fn lowering_slot_count_wraps_next_name() {
    struct Adjustable(Mutex<u32>);

    impl ConfigProvider for Arc<Adjustable> {
        fn current(&self) -> QuicksaveConfig {
            config(*self.0.lock().unwrap(), false)
        }
    }

    let slots = Arc::new(Adjustable(Mutex::new(5)));
    let mut m = QuicksaveManager::new(Box::new(Arc::clone(&slots)));
    let mut host = FakeHost::default();
    for _ in 0..3 {
        m.quicksave(&mut host).unwrap();
    }
    assert_eq!(m.generate_next_save_name(&host), "quicksave_004");

    *slots.0.lock().unwrap() = 2;
    assert_eq!(m.generate_next_save_name(&host), "quicksave_001");
}

// ── shared handle ───────────────────────────────────────────────

#[test]
fn shared_handle_serializes_threads() {
    let shared = SharedQuicksaveManager::new(manager(50, false));

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let shared = shared.clone();
            scope.spawn(move || {
                let mut host = FakeHost::default();
                for _ in 0..5 {
                    shared.on_save_completed(&mut host);
                }
            });
        }
    });

    assert_eq!(shared.with(|m| m.counter().next_index()), 21);
}
