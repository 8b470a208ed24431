use poker_ledger::ledger::ledger_store::load_records;
use poker_ledger::ledger::player_record::PlayerStatsRecord;
use poker_ledger::{IngestSummary, LedgerConfig, LedgerError, PokerLedger, SessionStatus};

use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SETTLED_SESSION: &str = "player_nickname,player_id,session_start_at,buy_in,buy_out,net\n\
Alice,a1,2024-01-01T20:00,1000,1300,300\n\
Bob,b1,2024-01-01T20:00,1000,575,-425\n\
Charlie,c1,2024-01-01T20:00,1000,875,-125\n\
Alice,a1,2024-01-01T22:00,500,750,250\n";

const SESSION_WITH_STRANGER: &str = "player_nickname,player_id,net\n\
Bob,b1,300\n\
Joe,j1,-300\n";

struct Fixture {
    _dir: TempDir,
    ledger_dir: PathBuf,
    store_path: PathBuf,
}

impl Fixture {
    fn new(store: serde_json::Value) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let ledger_dir = dir.path().join("ledgers");
        fs::create_dir(&ledger_dir).unwrap();
        fs::write(ledger_dir.join("ledger01_01.csv"), SETTLED_SESSION).unwrap();
        fs::write(ledger_dir.join("ledger01_02.csv"), SESSION_WITH_STRANGER).unwrap();

        let store_path = dir.path().join("data.json");
        fs::write(&store_path, serde_json::to_string_pretty(&store).unwrap()).unwrap();

        Self {
            _dir: dir,
            ledger_dir,
            store_path,
        }
    }

    fn zeroed() -> Self {
        Self::new(json!([
            zeroed_player(1, "Alice", &["Alice"]),
            zeroed_player(2, "Bob", &["Bob"]),
            zeroed_player(3, "Charlie", &["Charlie", "Chuck"]),
        ]))
    }

    fn config(&self) -> LedgerConfig {
        LedgerConfig::new(&self.ledger_dir, &self.store_path)
    }

    fn ledger(&self) -> PokerLedger {
        PokerLedger::new(self.config()).unwrap()
    }

    fn session(&self, file_name: &str) -> PathBuf {
        self.ledger_dir.join(file_name)
    }

    fn records(&self) -> Vec<PlayerStatsRecord> {
        load_records(&self.store_path).unwrap()
    }
}

fn zeroed_player(id: u32, name: &str, nicknames: &[&str]) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "player_nicknames": nicknames,
        "net": 0,
        "games_played": [],
        "biggest_win": 0,
        "biggest_loss": 0,
        "highest_net": 0,
        "lowest_net": 0,
        "net_dictionary": {"01_01": 0},
        "games_up_most": 0,
        "games_down_most": 0,
        "games_up": 0,
        "games_down": 0,
        "average_net": 0
    })
}

fn output(run: impl FnOnce(&mut Vec<u8>)) -> String {
    let mut out = Vec::new();
    run(&mut out);
    String::from_utf8(out).unwrap()
}

#[test]
fn test_add_settled_session_updates_all_players() {
    let fixture = Fixture::zeroed();
    let ledger = fixture.ledger();

    let mut status = None;
    let text = output(|out| {
        status = Some(ledger.add_session(&fixture.session("ledger01_01.csv"), out).unwrap());
    });

    assert_eq!(status, Some(SessionStatus::Added));
    assert_eq!(
        text,
        "Alice 5.5\nBob -4.25\nCharlie -1.25\nPoker game on 01_01 added\n"
    );

    let records = fixture.records();
    let alice = &records[0];
    assert_eq!(alice.net, 5.5);
    assert_eq!(alice.biggest_win, 5.5);
    assert_eq!(alice.biggest_loss, 0.0);
    assert_eq!(alice.highest_net, 5.5);
    assert_eq!(alice.lowest_net, 0.0);
    assert_eq!((alice.games_up, alice.games_down), (1, 0));
    assert_eq!((alice.games_up_most, alice.games_down_most), (1, 0));
    assert_eq!(alice.net_dictionary.get("01_01"), Some(&5.5));
    assert_eq!(alice.average_net, 5.5);
    assert_eq!(alice.extra_fields["name"], "Alice");

    let bob = &records[1];
    assert_eq!(bob.net, -4.25);
    assert_eq!(bob.biggest_win, 0.0);
    assert_eq!(bob.biggest_loss, -4.25);
    assert_eq!(bob.highest_net, 0.0);
    assert_eq!(bob.lowest_net, -4.25);
    assert_eq!((bob.games_up, bob.games_down), (0, 1));
    assert_eq!((bob.games_up_most, bob.games_down_most), (0, 1));

    let charlie = &records[2];
    assert_eq!(charlie.net, -1.25);
    assert_eq!(charlie.biggest_loss, -1.25);
    assert_eq!((charlie.games_up, charlie.games_down), (0, 1));
    assert_eq!((charlie.games_up_most, charlie.games_down_most), (0, 0));
    assert_eq!(charlie.games_played, vec!["01_01"]);
}

#[test]
fn test_add_session_on_top_of_history() {
    let fixture = Fixture::new(json!([
        {
            "player_nicknames": ["Alice"],
            "net": 0,
            "games_played": ["12_01", "12_08"],
            "biggest_win": 20,
            "biggest_loss": -10,
            "highest_net": 10,
            "lowest_net": -10,
            "net_dictionary": {"12_01": -10, "12_08": 0},
            "games_up_most": 1,
            "games_down_most": 1,
            "games_up": 1,
            "games_down": 1,
            "average_net": 0
        },
        zeroed_player(2, "Bob", &["Bob"]),
        zeroed_player(3, "Charlie", &["Charlie"]),
    ]));

    let _ = output(|out| {
        fixture
            .ledger()
            .add_session(&fixture.session("ledger01_01.csv"), out)
            .unwrap();
    });

    let records = fixture.records();
    let alice = &records[0];
    assert_eq!(alice.net, 5.5);
    assert_eq!(alice.biggest_win, 20.0);
    assert_eq!(alice.biggest_loss, -10.0);
    assert_eq!(alice.highest_net, 10.0);
    assert_eq!(alice.lowest_net, -10.0);
    assert_eq!((alice.games_up, alice.games_down), (2, 1));
    assert_eq!(alice.games_up_most, 2);
    assert_eq!(alice.games_played, vec!["12_01", "12_08", "01_01"]);
    assert_eq!(alice.average_net, 5.5 / 3.0);
    assert_eq!(alice.net_dictionary.len(), 3);
}

#[test]
fn test_unknown_player_leaves_store_untouched() {
    let fixture = Fixture::zeroed();
    let before = fs::read(&fixture.store_path).unwrap();

    let mut status = None;
    let text = output(|out| {
        status = Some(
            fixture
                .ledger()
                .add_session(&fixture.session("ledger01_02.csv"), out)
                .unwrap(),
        );
    });

    assert_eq!(status, Some(SessionStatus::Rejected));
    assert_eq!(text, "Joe\nNot all players known\n");
    assert_eq!(fs::read(&fixture.store_path).unwrap(), before);
    assert!(fixture.records().iter().all(|r| r.games_played.is_empty()));
}

#[test]
fn test_add_all_sessions_skips_rejected_session() {
    let fixture = Fixture::zeroed();

    let mut summary = IngestSummary::default();
    let text = output(|out| summary = fixture.ledger().add_all_sessions(out).unwrap());

    assert_eq!(summary, IngestSummary { added: 1, rejected: 1 });
    assert_eq!(
        text,
        "Alice 5.5\nBob -4.25\nCharlie -1.25\nPoker game on 01_01 added\nJoe\nNot all players known\n"
    );
    assert_eq!(fixture.records()[1].games_played, vec!["01_01"]);
}

#[test]
fn test_add_all_sessions_with_exclusions() {
    let fixture = Fixture::zeroed();
    let mut config = fixture.config();
    config.excluded = vec!["Joe".to_owned()];
    let ledger = PokerLedger::new(config).unwrap();

    let mut summary = IngestSummary::default();
    let text = output(|out| summary = ledger.add_all_sessions(out).unwrap());

    assert_eq!(summary, IngestSummary { added: 2, rejected: 0 });
    assert!(text.ends_with("Bob 3.0\nPoker game on 01_02 added\n"));

    let records = fixture.records();
    let bob = &records[1];
    assert_eq!(bob.games_played, vec!["01_01", "01_02"]);
    assert_eq!(bob.net, -1.25);
    assert_eq!(bob.highest_net, 0.0);
    assert_eq!(bob.lowest_net, -4.25);
    assert_eq!(bob.biggest_win, 3.0);
    assert_eq!((bob.games_up_most, bob.games_down_most), (1, 2));
}

#[test]
fn test_alias_counts_for_owning_player() {
    let fixture = Fixture::zeroed();
    fs::write(
        fixture.session("ledger01_03.csv"),
        "player_nickname,net\nChuck,200\nAlice,-200\n",
    )
    .unwrap();

    let _ = output(|out| {
        fixture
            .ledger()
            .add_session(&fixture.session("ledger01_03.csv"), out)
            .unwrap();
    });

    let records = fixture.records();
    let charlie = &records[2];
    assert_eq!(charlie.net, 2.0);
    assert_eq!(charlie.games_played, vec!["01_03"]);
}

#[test]
fn test_print_session_results_sorted_by_net() {
    let fixture = Fixture::zeroed();

    let text = output(|out| {
        fixture
            .ledger()
            .print_session_results(&fixture.session("ledger01_01.csv"), out)
            .unwrap();
    });

    assert_eq!(text, "Alice: 5.5\nCharlie: -1.25\nBob: -4.25\n");
}

#[test]
fn test_print_all_sessions_and_nicknames() {
    let fixture = Fixture::zeroed();
    let ledger = fixture.ledger();

    let sessions = output(|out| ledger.print_all_sessions(out).unwrap());
    let nicknames = output(|out| ledger.print_unique_nicknames(out).unwrap());

    assert_eq!(sessions, "01_01\n01_02\n");
    assert_eq!(nicknames, "Alice\nBob\nCharlie\nJoe\n");
}

#[test]
fn test_reset_is_idempotent() {
    let fixture = Fixture::zeroed();
    let ledger = fixture.ledger();
    let _ = output(|out| {
        ledger
            .add_session(&fixture.session("ledger01_01.csv"), out)
            .unwrap();
    });

    ledger.reset_statistics().unwrap();
    let once = fs::read(&fixture.store_path).unwrap();
    ledger.reset_statistics().unwrap();

    assert_eq!(fs::read(&fixture.store_path).unwrap(), once);
    for record in fixture.records() {
        assert_eq!(record.net, 0.0);
        assert!(record.games_played.is_empty());
        assert_eq!(record.games_up + record.games_down, 0);
        assert_eq!(record.games_up_most + record.games_down_most, 0);
        assert_eq!(record.net_dictionary.len(), 1);
        assert_eq!(record.net_dictionary.get("01_01"), Some(&0.0));
        assert_eq!(record.average_net, 0.0);
    }
    assert_eq!(fixture.records()[2].nicknames, vec!["Charlie", "Chuck"]);
}

#[test]
fn test_sort_games_played() {
    let mut alice = PlayerStatsRecord::new(["Alice"]);
    alice.games_played = vec!["11_07".into(), "01_15".into(), "10_02".into()];
    let fixture = Fixture::new(serde_json::to_value(vec![alice]).unwrap());

    fixture.ledger().sort_games_played().unwrap();

    assert_eq!(
        fixture.records()[0].games_played,
        vec!["01_15", "10_02", "11_07"]
    );
}

#[test]
fn test_add_field_to_every_player() {
    let fixture = Fixture::zeroed();
    let ledger = fixture.ledger();

    ledger.add_field("mock_field", json!(0)).unwrap();
    let reserved = ledger.add_field("net", json!(1));

    assert!(matches!(reserved, Err(LedgerError::ReservedField(_))));
    for record in fixture.records() {
        assert_eq!(record.extra_fields["mock_field"], 0);
        assert_eq!(record.net, 0.0);
    }
}

#[test]
fn test_missing_store_or_folder_is_fatal() {
    let fixture = Fixture::zeroed();

    let no_store = PokerLedger::new(LedgerConfig::new(&fixture.ledger_dir, "fake_path.json"));
    let no_folder = PokerLedger::new(LedgerConfig::new("fake_path", &fixture.store_path));

    assert!(matches!(no_store, Err(LedgerError::StoreNotFound(_))));
    assert!(matches!(no_folder, Err(LedgerError::LedgerDirNotFound(_))));
}

#[test]
fn test_bad_session_files_are_fatal() {
    let fixture = Fixture::zeroed();
    let ledger = fixture.ledger();
    let txt = fixture.session("ledger01_01.txt");
    fs::write(&txt, SETTLED_SESSION).unwrap();
    let unnamed = fixture.session("results.csv");
    fs::write(&unnamed, SETTLED_SESSION).unwrap();

    let mut sink = Vec::new();
    let not_csv = ledger.add_session(&txt, &mut sink);
    let missing = ledger.print_session_results(Path::new("fake_ledger01_03.csv"), &mut sink);
    let no_id = ledger.add_session(&unnamed, &mut sink);

    assert!(matches!(not_csv, Err(LedgerError::NotCsv(_))));
    assert!(matches!(missing, Err(LedgerError::SessionFileNotFound(_))));
    assert!(matches!(no_id, Err(LedgerError::MissingSessionId(_))));
    assert!(sink.is_empty());
    assert!(fixture.records().iter().all(|r| r.games_played.is_empty()));
}
