use super::*;
use crate::layout::columns_for;
use crate::model::{ActionableReference, Resolution};
use crate::normalize::normalize;
use crate::resolve::resolve;
use serde_json::{json, Value};

/// Returns the nth data line, recording what it was asked.
struct ScriptedChooser {
    pick: Option<usize>,
    seen_input: String,
    seen_preview: Option<String>,
}

impl ScriptedChooser {
    fn picking(pick: Option<usize>) -> Self {
        Self {
            pick,
            seen_input: String::new(),
            seen_preview: None,
        }
    }
}

impl Chooser for ScriptedChooser {
    fn name(&self) -> &str {
        "scripted"
    }

    fn choose(&mut self, request: &ChooserRequest<'_>) -> Result<ChooserOutcome, PickError> {
        self.seen_input = request.input.to_string();
        self.seen_preview = request.preview_command.clone();
        Ok(match self.pick {
            Some(n) => ChooserOutcome::Chosen(
                request.data_lines().nth(n).expect("line exists").to_string(),
            ),
            None => ChooserOutcome::Cancelled,
        })
    }
}

struct FailingChooser;

impl Chooser for FailingChooser {
    fn name(&self) -> &str {
        "failing"
    }

    fn choose(&mut self, _request: &ChooserRequest<'_>) -> Result<ChooserOutcome, PickError> {
        Err(PickError::chooser_unavailable("fzf", "not found"))
    }
}

fn duplicate_titled_tracks(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({"name": "Same Title", "result_id": format!("id-{i}"), "year": 2000 + i}))
        .collect()
}

#[test]
fn parse_index_tokens() {
    assert_eq!(parse_index_token("1."), Some(0));
    assert_eq!(parse_index_token("'12.'"), Some(11));
    assert_eq!(parse_index_token("7"), Some(6));
    assert_eq!(parse_index_token("0."), None);
    assert_eq!(parse_index_token("x."), None);
    assert_eq!(parse_chosen_line("3.   Song  2001"), Some(2));
    assert_eq!(parse_chosen_line(""), None);
}

#[test]
fn every_index_round_trips_to_its_record() {
    let records = duplicate_titled_tracks(12);
    let rows = normalize(&records, EntityKind::Track);
    let columns = columns_for(EntityKind::Track);
    for i in 0..records.len() {
        let mut chooser = ScriptedChooser::picking(Some(i));
        let result = select(&rows, columns, EntityKind::Track, &mut chooser, None).expect("select");
        assert_eq!(result, SelectionResult::Chosen(i));
        let resolution = resolve(result, &records, EntityKind::Track).expect("resolve");
        assert_eq!(
            resolution,
            Resolution::Reference(ActionableReference {
                kind: EntityKind::Track,
                id: format!("id-{i}"),
                url: None,
                extra: None,
            })
        );
    }
}

#[test]
fn cancel_with_ten_results() {
    let records = duplicate_titled_tracks(10);
    let rows = normalize(&records, EntityKind::Track);
    let mut chooser = ScriptedChooser::picking(None);
    let result = select(
        &rows,
        columns_for(EntityKind::Track),
        EntityKind::Track,
        &mut chooser,
        None,
    )
    .expect("cancel is not an error");
    assert_eq!(result, SelectionResult::Cancelled);
    assert_eq!(
        resolve(result, &records, EntityKind::Track).expect("resolve"),
        Resolution::Cancelled
    );
}

#[test]
fn single_record_supports_select_and_cancel() {
    let records = duplicate_titled_tracks(1);
    let rows = normalize(&records, EntityKind::Album);
    let columns = columns_for(EntityKind::Album);
    let mut pick = ScriptedChooser::picking(Some(0));
    assert_eq!(
        select(&rows, columns, EntityKind::Album, &mut pick, None).expect("select"),
        SelectionResult::Chosen(0)
    );
    let mut cancel = ScriptedChooser::picking(None);
    assert_eq!(
        select(&rows, columns, EntityKind::Album, &mut cancel, None).expect("cancel"),
        SelectionResult::Cancelled
    );
    let mut first = FirstRowChooser;
    assert_eq!(
        select(&rows, columns, EntityKind::Album, &mut first, None).expect("first"),
        SelectionResult::Chosen(0)
    );
}

#[test]
fn empty_rows_are_rejected() {
    let mut chooser = ScriptedChooser::picking(Some(0));
    let err = select(
        &[],
        columns_for(EntityKind::Artist),
        EntityKind::Artist,
        &mut chooser,
        None,
    )
    .expect_err("no rows");
    assert!(matches!(err, PickError::NoResults { kind: EntityKind::Artist }));
}

#[test]
fn chooser_errors_propagate_unchanged() {
    let rows = normalize(&duplicate_titled_tracks(2), EntityKind::Track);
    let err = select(
        &rows,
        columns_for(EntityKind::Track),
        EntityKind::Track,
        &mut FailingChooser,
        None,
    )
    .expect_err("unavailable");
    assert!(matches!(err, PickError::EnvironmentUnavailable { .. }));
}

#[test]
fn line_without_index_is_selection_failure() {
    struct Garbage;
    impl Chooser for Garbage {
        fn name(&self) -> &str {
            "garbage"
        }
        fn choose(&mut self, _request: &ChooserRequest<'_>) -> Result<ChooserOutcome, PickError> {
            Ok(ChooserOutcome::Chosen("Same Title".to_string()))
        }
    }
    let rows = normalize(&duplicate_titled_tracks(2), EntityKind::Track);
    let err = select(
        &rows,
        columns_for(EntityKind::Track),
        EntityKind::Track,
        &mut Garbage,
        None,
    )
    .expect_err("garbage line");
    assert!(matches!(err, PickError::SelectionFailed { .. }));
}

#[test]
fn request_carries_table_and_preview_template() {
    let rows = normalize(&duplicate_titled_tracks(3), EntityKind::Playlist);
    let preview = PreviewCommand::new([
        "/opt/rpick dir/rpick",
        "preview",
        "--kind",
        "playlist",
        "--records",
        "/tmp/records.json",
    ]);
    let mut chooser = ScriptedChooser::picking(Some(1));
    select(
        &rows,
        columns_for(EntityKind::Playlist),
        EntityKind::Playlist,
        &mut chooser,
        Some(&preview),
    )
    .expect("select");
    assert_eq!(chooser.seen_input.lines().count(), 4);
    assert!(chooser.seen_input.starts_with("#      PLAYLIST"));
    assert_eq!(
        chooser.seen_preview.as_deref(),
        Some("'/opt/rpick dir/rpick' preview --kind playlist --records /tmp/records.json --index {1}")
    );
}
