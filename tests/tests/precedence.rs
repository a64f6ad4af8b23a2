use tierconf_core::{layered, Stage};
use tierconf_tests::{args, env, resolver, Fixture};

#[derive(Debug, Default, Clone, PartialEq)]
struct Layers {
    value: i32,
    name: String,
}

layered! {
    Layers {
        value: i32 { default = "1" },
        name: String,
    }
}

fn resolve_layers(file: bool, cli: bool, environment: bool) -> i32 {
    let fixture = Fixture::new().unwrap();
    let mut r = resolver();
    if file {
        r = r.with_file(fixture.write("layers.yaml", "value: 2\n").unwrap());
    }
    if cli {
        r = r.with_args(args(&["--value=3"]));
    }
    if environment {
        r = r.with_env(env(&[("value", "4")]));
    }
    let mut layers = Layers::default();
    r.resolve(&mut layers).unwrap();
    layers.value
}

#[test]
fn env_wins_over_everything() {
    assert_eq!(resolve_layers(true, true, true), 4);
}

#[test]
fn args_win_without_env() {
    assert_eq!(resolve_layers(true, true, false), 3);
}

#[test]
fn file_wins_over_default() {
    assert_eq!(resolve_layers(true, false, false), 2);
}

#[test]
fn default_applies_alone() {
    assert_eq!(resolve_layers(false, false, false), 1);
}

#[test]
fn env_wins_over_file_without_args() {
    assert_eq!(resolve_layers(true, false, true), 4);
}

#[allow(non_snake_case)]
#[derive(Debug, Default)]
struct Flags {
    A: bool,
    B: bool,
    C: bool,
}

layered! {
    Flags {
        A: bool,
        B: bool,
        C: bool,
    }
}

#[test]
fn boolean_shorthand() {
    let mut flags = Flags::default();
    resolver()
        .with_args(args(&["--A", "--B=true", "--C", "true"]))
        .resolve(&mut flags)
        .unwrap();
    assert!(flags.A);
    assert!(flags.B);
    assert!(flags.C);
}

#[allow(non_snake_case)]
#[derive(Debug, Default)]
struct Shorthand {
    Count: u32,
    Label: String,
}

layered! {
    Shorthand {
        Count: u32 { default = "5" },
        Label: String,
    }
}

#[test]
fn shorthand_on_non_boolean_fields() {
    let mut shorthand = Shorthand::default();
    resolver()
        .with_args(args(&["--Count", "--Label"]))
        .resolve(&mut shorthand)
        .unwrap();
    assert_eq!(shorthand.Count, 5);
    assert_eq!(shorthand.Label, "true");
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Mixed {
    small: i8,
    medium: i16,
    large: i32,
    huge: i64,
    tiny: u8,
    short: u16,
    word: u32,
    long: u64,
    ratio: f32,
    precise: f64,
    enabled: bool,
    label: String,
}

layered! {
    Mixed {
        small: i8,
        medium: i16,
        large: i32,
        huge: i64,
        tiny: u8,
        short: u16,
        word: u32,
        long: u64,
        ratio: f32,
        precise: f64,
        enabled: bool,
        label: String,
    }
}

const PAIRS: [(&str, &str); 12] = [
    ("small", "-12"),
    ("medium", "123"),
    ("large", "-70000"),
    ("huge", "9000000000"),
    ("tiny", "200"),
    ("short", "65000"),
    ("word", "4000000000"),
    ("long", "18000000000000000000"),
    ("ratio", "123.123"),
    ("precise", "456.456"),
    ("enabled", "true"),
    ("label", "abc"),
];

#[test]
fn every_kind_parses_from_env() {
    let mut mixed = Mixed::default();
    resolver().with_env(env(&PAIRS)).resolve(&mut mixed).unwrap();
    assert_eq!(mixed.small, -12);
    assert_eq!(mixed.medium, 123);
    assert_eq!(mixed.large, -70000);
    assert_eq!(mixed.huge, 9_000_000_000);
    assert_eq!(mixed.tiny, 200);
    assert_eq!(mixed.short, 65000);
    assert_eq!(mixed.word, 4_000_000_000);
    assert_eq!(mixed.long, 18_000_000_000_000_000_000);
    assert!((mixed.ratio - 123.123).abs() < f32::EPSILON);
    assert!((mixed.precise - 456.456).abs() < f64::EPSILON);
    assert!(mixed.enabled);
    assert_eq!(mixed.label, "abc");
}

#[test]
fn env_and_args_round_trip() {
    let mut from_env = Mixed::default();
    resolver().with_env(env(&PAIRS)).resolve(&mut from_env).unwrap();

    let tokens: Vec<String> = PAIRS.iter().map(|(k, v)| format!("--{k}={v}")).collect();
    let mut from_args = Mixed::default();
    resolver()
        .with_args(tierconf_core::ArgSource::from_args(tokens))
        .resolve(&mut from_args)
        .unwrap();

    assert_eq!(from_env, from_args);
}

#[test]
fn out_of_range_values_keep_previous_value() {
    let mut mixed = Mixed {
        small: 1,
        medium: 2,
        large: 3,
        huge: 4,
        tiny: 5,
        short: 6,
        word: 7,
        long: 8,
        ratio: 9.0,
        ..Mixed::default()
    };
    let before = mixed.clone();
    resolver()
        .with_env(env(&[
            ("small", "128"),
            ("medium", "32768"),
            ("large", "2147483648"),
            ("huge", "9223372036854775808"),
            ("tiny", "-1"),
            ("short", "65536"),
            ("word", "4294967296"),
            ("long", "18446744073709551616"),
            ("ratio", "1e39"),
        ]))
        .resolve(&mut mixed)
        .unwrap();
    assert_eq!(mixed, before);
}

#[test]
fn non_numeric_values_are_ignored() {
    let mut mixed = Mixed::default();
    let res = resolver()
        .with_args(args(&[
            "--small=abc",
            "--word",
            "def",
            "--precise=1.2.3",
            "--enabled=maybe",
        ]))
        .resolve_with_report(&mut mixed)
        .unwrap();
    assert_eq!(mixed, Mixed::default());
    assert!(res.is_untouched());
}

#[test]
fn report_names_the_winning_stage() {
    let fixture = Fixture::new().unwrap();
    let path = fixture.write("layers.yaml", "value: 2\nname: file\n").unwrap();
    let mut layers = Layers::default();
    let res = resolver()
        .with_file(path)
        .with_args(args(&["--value", "3"]))
        .resolve_with_report(&mut layers)
        .unwrap();
    assert_eq!(res.winner("value").unwrap().stage, Stage::Args);
    assert_eq!(res.winner("name").unwrap().stage, Stage::File);
    assert_eq!(res.by_stage(Stage::Default).count(), 1);
}
