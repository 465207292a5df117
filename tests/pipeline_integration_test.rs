//! End-to-end stage runs through the library API.

use icpscore::pipeline::{read_table, run_pipeline, run_stage, Stage, StageContext, Table};
use icpscore::{IcpConfig, IcpError, PatternLibrary, VerticalClassifier};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MONEY_SCORED: &str = indoc! {"
    page_name,page_category,share_message,share_call,share_form,money_score,cta_types,ad_texts_combined,owner_email
    Casa Lista,Real Estate Agent,0.8,0.1,0.0,35,WHATSAPP_MESSAGE,\"¿Quieres vender tu casa? Cupos limitados, agenda tu cita hoy\",ana@example.com
    Roof Pros,Roofing Contractor,0.0,0.6,0.2,50,CALL_NOW|LEARN_MORE,\"Free inspection. Requirements apply. Check your eligibility. Pre-approval needed.\",ops@roofpros.test
    Quiet Bakery,Bakery,0.0,0.0,0.0,5,,,
    Bad Shares,Plumber,1.7,0.0,0.0,80,CALL_NOW,Drain cleaning today only,
    Tied Bakery,Bakery,0.0,0.0,0.0,5,,,
"};

struct Fixture {
    library: PatternLibrary,
    classifier: VerticalClassifier,
    config: IcpConfig,
}

impl Fixture {
    fn new() -> Self {
        Self {
            library: PatternLibrary::builtin().unwrap(),
            classifier: VerticalClassifier::builtin().unwrap(),
            config: IcpConfig::default(),
        }
    }

    fn ctx(&self) -> StageContext<'_> {
        StageContext::new(&self.library, &self.classifier, &self.config)
    }
}

fn column(table: &Table, name: &str) -> Vec<String> {
    let index = table
        .column(name)
        .unwrap_or_else(|| panic!("missing column {}", name));
    (0..table.len())
        .map(|row| table.cell(row, index).unwrap_or_default().to_string())
        .collect()
}

fn write_input(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join(Stage::Urgency.input_file());
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn urgency_stage_ranks_and_isolates_bad_rows() {
    let fixture = Fixture::new();
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), MONEY_SCORED);
    let output = dir.path().join("m4.csv");

    let report = run_stage(Stage::Urgency, &input, &output, &fixture.ctx()).unwrap();
    assert_eq!(report.outcome.rows, 5);
    assert_eq!(report.outcome.failure_count(), 1);
    assert_eq!(report.outcome.failures[0].page_name, "Bad Shares");

    let table = read_table(&output).unwrap();
    assert_eq!(
        column(&table, "page_name"),
        vec![
            "Roof Pros",
            "Casa Lista",
            "Quiet Bakery",
            "Tied Bakery",
            "Bad Shares"
        ]
    );
    assert_eq!(column(&table, "rank"), vec!["1", "2", "3", "4", "5"]);

    // Roof Pros: 50 money + direct 15, form 2, qualification 5
    assert_eq!(column(&table, "combined_score")[0], "72");

    // Casa Lista: 35 money + direct 25, immediacy 2 (cupos limitados)
    assert_eq!(column(&table, "urgency_direct")[1], "25");
    assert_eq!(column(&table, "urgency_immediacy")[1], "2");
    assert_eq!(column(&table, "combined_score")[1], "62");

    let bad = 4;
    assert_eq!(column(&table, "urgency_score")[bad], "0");
    assert_eq!(
        column(&table, "urgency_breakdown")[bad],
        "direct:0|form:0|immediacy:0|qualification:0"
    );
    assert!(column(&table, "urgency_error")[bad].contains("share_message"));

    // Passthrough columns survive untouched
    assert_eq!(column(&table, "owner_email")[1], "ana@example.com");
}

#[test]
fn urgency_totals_match_breakdowns() {
    let fixture = Fixture::new();
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), MONEY_SCORED);
    let output = dir.path().join("m4.csv");
    run_stage(Stage::Urgency, &input, &output, &fixture.ctx()).unwrap();

    let table = read_table(&output).unwrap();
    let totals = column(&table, "urgency_score");
    for (row, breakdown) in column(&table, "urgency_breakdown").iter().enumerate() {
        let sum: u32 = breakdown
            .split('|')
            .map(|pair| pair.split(':').nth(1).unwrap().parse::<u32>().unwrap())
            .sum();
        let total: u32 = totals[row].parse().unwrap();
        assert_eq!(sum, total);
        assert!(total <= 50);
    }
}

#[test]
fn fit_stage_scores_qualification_interaction() {
    let fixture = Fixture::new();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("m3_money_scored.csv"), MONEY_SCORED).unwrap();
    let reports = run_pipeline(dir.path(), &fixture.ctx()).unwrap();
    let fit = &reports[1].table;

    let roof = column(fit, "page_name")
        .iter()
        .position(|name| name == "Roof Pros")
        .unwrap();
    assert_eq!(column(fit, "fit_qualification_depth")[roof], "6");
    assert_eq!(column(fit, "fit_generic_cta")[roof], "0");
    assert_eq!(column(fit, "fit_conversational_entry")[roof], "6");
    assert_eq!(column(fit, "fit_complexity")[roof], "3");

    for row in 0..fit.len() {
        let total: u32 = column(fit, "fit_score")[row].parse().unwrap();
        let explicit: u32 = column(fit, "explicit_fit_score")[row].parse().unwrap();
        let implicit: u32 = column(fit, "implicit_fit_score")[row].parse().unwrap();
        assert_eq!(total, explicit + implicit);
        assert!(explicit <= 30 && implicit <= 20);
    }
}

#[test]
fn vertical_stage_tags_every_row() {
    let fixture = Fixture::new();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("m3_money_scored.csv"), MONEY_SCORED).unwrap();
    run_pipeline(dir.path(), &fixture.ctx()).unwrap();

    let table = read_table(&Stage::Vertical.default_output(dir.path())).unwrap();
    let names = column(&table, "page_name");
    let verticals = column(&table, "vertical");
    let lookup = |name: &str| {
        let row = names.iter().position(|n| n == name).unwrap();
        verticals[row].clone()
    };

    assert_eq!(lookup("Casa Lista"), "real_estate_seller");
    assert_eq!(lookup("Roof Pros"), "roofing");
    assert_eq!(lookup("Quiet Bakery"), "unclassified");
    assert!(verticals.iter().all(|v| !v.is_empty()));
}

#[test]
fn empty_input_writes_header_only() {
    let fixture = Fixture::new();
    let dir = TempDir::new().unwrap();
    let input = write_input(
        dir.path(),
        "page_name,share_message,share_call,share_form,money_score,ad_texts_combined\n",
    );
    let output = dir.path().join("m4.csv");

    let report = run_stage(Stage::Urgency, &input, &output, &fixture.ctx()).unwrap();
    assert_eq!(report.outcome.rows, 0);

    let written = fs::read_to_string(&output).unwrap();
    let mut expected = vec![
        "page_name",
        "share_message",
        "share_call",
        "share_form",
        "money_score",
        "ad_texts_combined",
    ];
    let stage_columns = Stage::Urgency.output_columns();
    expected.extend(stage_columns.iter().map(String::as_str));
    assert_eq!(written, format!("{}\n", expected.join(",")));
}

#[test]
fn zero_byte_input_writes_stage_header() {
    let fixture = Fixture::new();
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "");
    let output = dir.path().join("m4.csv");

    run_stage(Stage::Urgency, &input, &output, &fixture.ctx()).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        format!("{}\n", Stage::Urgency.output_columns().join(","))
    );
}

#[test]
fn rerunning_a_stage_on_its_output_keeps_columns_unique() {
    let fixture = Fixture::new();
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), MONEY_SCORED);
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    run_stage(Stage::Urgency, &input, &first, &fixture.ctx()).unwrap();
    run_stage(Stage::Urgency, &first, &second, &fixture.ctx()).unwrap();

    let first_table = read_table(&first).unwrap();
    let second_table = read_table(&second).unwrap();
    assert_eq!(first_table.headers(), second_table.headers());
    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn missing_input_is_fatal_with_hint() {
    let fixture = Fixture::new();
    let dir = TempDir::new().unwrap();
    let err = run_pipeline(dir.path(), &fixture.ctx()).unwrap_err();
    match err {
        IcpError::InputNotFound { path, hint } => {
            assert!(path.ends_with("m3_money_scored.csv"));
            assert!(hint.contains("money scoring"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn scoring_is_reproducible_across_runs() {
    let fixture = Fixture::new();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("m3_money_scored.csv"), MONEY_SCORED).unwrap();

    run_pipeline(dir.path(), &fixture.ctx()).unwrap();
    let first = fs::read_to_string(Stage::Vertical.default_output(dir.path())).unwrap();
    run_pipeline(dir.path(), &fixture.ctx()).unwrap();
    let second = fs::read_to_string(Stage::Vertical.default_output(dir.path())).unwrap();
    assert_eq!(first, second);
}
