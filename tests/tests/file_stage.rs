use tierconf_core::{layered, load_from_file, FileOutcome, Stage, YamlText};
use tierconf_tests::{args, env, resolver, Fixture};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Default, PartialEq)]
struct Pool {
    min: u16,
    max: u16,
}

#[derive(Debug, Default, PartialEq)]
struct Database {
    url: String,
    password: String,
    port: u16,
    ratio: f32,
    replicas: u8,
    readonly: bool,
    pool: Pool,
}

layered! {
    Database {
        url: String { default = "postgres://localhost", env = "DATABASE_URL" },
        password: String { env = "DATABASE_PASSWORD" },
        port: u16 { default = "5432" },
        ratio: f32,
        replicas: u8 { arg = "replica-count" },
        readonly: bool,
        pool: embedded,
    }
}

#[test]
fn yaml_file_fills_fields_by_name() {
    let fixture = Fixture::new().unwrap();
    let path = fixture
        .write(
            "db.yaml",
            "url: postgres://db.internal\nport: 6432\nratio: 0.25\nreplicas: 3\nreadonly: true\n",
        )
        .unwrap();

    let mut db = Database::default();
    let res = resolver()
        .with_file(path)
        .resolve_with_report(&mut db)
        .unwrap();

    assert_eq!(db.url, "postgres://db.internal");
    assert_eq!(db.port, 6432);
    assert!((db.ratio - 0.25).abs() < f32::EPSILON);
    assert_eq!(db.replicas, 3);
    assert!(db.readonly);
    assert!(matches!(res.file, FileOutcome::Applied { fields: 5, .. }));
}

#[test]
fn unknown_keys_and_nulls_are_ignored() {
    let fixture = Fixture::new().unwrap();
    let path = fixture
        .write("db.yaml", "port: ~\nunrelated: 12\nreplicas: 2\n")
        .unwrap();

    let mut db = Database::default();
    resolver().with_file(path).resolve(&mut db).unwrap();
    assert_eq!(db.port, 5432);
    assert_eq!(db.replicas, 2);
}

#[test]
fn file_keys_ignore_stage_annotations() {
    let fixture = Fixture::new().unwrap();
    let path = fixture
        .write("db.yaml", "DATABASE_URL: ignored\nreplica-count: 9\n")
        .unwrap();

    let mut db = Database::default();
    resolver().with_file(path).resolve(&mut db).unwrap();
    assert_eq!(db.url, "postgres://localhost");
    assert_eq!(db.replicas, 0);
}

#[test]
fn undecodable_file_is_skipped_whole() {
    init_tracing();
    let fixture = Fixture::new().unwrap();
    let path = fixture
        .write("db.yaml", "url: postgres://db.internal\nreplicas: 300\n")
        .unwrap();

    let mut db = Database::default();
    let res = resolver()
        .with_file(path)
        .with_args(args(&["--replica-count", "4"]))
        .resolve_with_report(&mut db)
        .unwrap();

    assert_eq!(db.url, "postgres://localhost");
    assert_eq!(db.replicas, 4);
    assert!(matches!(res.file, FileOutcome::Skipped { .. }));
    assert_eq!(res.by_stage(Stage::File).count(), 0);
}

#[test]
fn malformed_yaml_is_skipped() {
    init_tracing();
    let fixture = Fixture::new().unwrap();
    let path = fixture.write("db.yaml", "port: [1, 2\n").unwrap();

    let mut db = Database::default();
    let res = resolver()
        .with_file(path)
        .resolve_with_report(&mut db)
        .unwrap();
    assert_eq!(db.port, 5432);
    assert!(matches!(res.file, FileOutcome::Skipped { .. }));
}

#[test]
fn missing_file_still_applies_other_stages() {
    let fixture = Fixture::new().unwrap();
    let mut db = Database::default();
    resolver()
        .with_file(fixture.path("absent.yaml"))
        .with_args(args(&["--readonly"]))
        .with_env(env(&[("DATABASE_PASSWORD", "hunter2")]))
        .resolve(&mut db)
        .unwrap();

    assert_eq!(db.url, "postgres://localhost");
    assert!(db.readonly);
    assert_eq!(db.password, "hunter2");
}

#[test]
fn load_from_file_with_missing_path_succeeds() {
    let fixture = Fixture::new().unwrap();
    let path = fixture.path("absent.yaml");
    let mut db = Database::default();
    load_from_file(path.to_str().unwrap(), &mut db).unwrap();
    assert_eq!(db.port, 5432);
}

#[test]
fn embedded_record_is_left_alone() {
    let fixture = Fixture::new().unwrap();
    let path = fixture
        .write("db.yaml", "pool:\n  min: 1\n  max: 10\nmin: 1\n")
        .unwrap();

    let mut db = Database::default();
    resolver()
        .with_file(path)
        .with_env(env(&[("min", "2"), ("max", "20")]))
        .resolve(&mut db)
        .unwrap();
    assert_eq!(db.pool, Pool::default());
}

#[test]
fn placeholders_expand_from_environment_when_enabled() {
    let fixture = Fixture::new().unwrap();
    let path = fixture
        .write("db.yaml", "password: \"${DB_SECRET}\"\nport: ${DB_PORT}\n")
        .unwrap();
    let environment = || env(&[("DB_SECRET", "from-env"), ("DB_PORT", "7000")]);

    let mut db = Database::default();
    resolver()
        .with_file(&path)
        .with_env(environment())
        .expand_placeholders(true)
        .resolve(&mut db)
        .unwrap();
    assert_eq!(db.password, "from-env");
    assert_eq!(db.port, 7000);

    // Without expansion `${DB_PORT}` is not a number and the file is skipped.
    let mut db = Database::default();
    resolver()
        .with_file(&path)
        .with_env(environment())
        .resolve(&mut db)
        .unwrap();
    assert_eq!(db.password, "");
    assert_eq!(db.port, 5432);
}

#[test]
fn in_memory_document_source() {
    let mut db = Database::default();
    resolver()
        .with_document(YamlText::new("port: 15432\nreadonly: false\n"))
        .with_env(env(&[("readonly", "1")]))
        .resolve(&mut db)
        .unwrap();
    assert_eq!(db.port, 15432);
    assert!(db.readonly);
}

#[test]
fn empty_path_disables_file_stage() {
    let mut db = Database::default();
    let res = resolver()
        .with_file("")
        .resolve_with_report(&mut db)
        .unwrap();
    assert_eq!(res.file, FileOutcome::NotConfigured);
    assert_eq!(db.port, 5432);
}

#[test]
fn report_serializes_with_file_status() {
    let fixture = Fixture::new().unwrap();
    let path = fixture.write("db.yaml", "port: 6000\n").unwrap();

    let mut db = Database::default();
    let res = resolver()
        .with_file(path)
        .with_env(env(&[("DATABASE_URL", "postgres://env")]))
        .resolve_with_report(&mut db)
        .unwrap();

    let json = serde_json::to_value(&res).unwrap();
    assert_eq!(json["file"]["status"], "applied");
    assert_eq!(json["file"]["fields"], 1);
    let last = json["decisions"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["stage"], "env");
    assert_eq!(last["field"], "url");
    assert_eq!(last["value"], "postgres://env");
}

#[derive(Debug, Default)]
struct Release {
    version: String,
    build: String,
    stable: String,
    port: u16,
}

layered! {
    Release {
        version: String,
        build: String,
        stable: String,
        port: u16,
    }
}

#[test]
fn scalar_values_fill_string_fields() {
    let fixture = Fixture::new().unwrap();
    let path = fixture
        .write("release.yaml", "version: 1.2\nbuild: 42\nstable: true\nport: 8080\n")
        .unwrap();

    let mut release = Release::default();
    let res = resolver()
        .with_file(path)
        .resolve_with_report(&mut release)
        .unwrap();

    assert_eq!(release.version, "1.2");
    assert_eq!(release.build, "42");
    assert_eq!(release.stable, "true");
    assert_eq!(release.port, 8080);
    assert!(matches!(res.file, FileOutcome::Applied { fields: 4, .. }));
}

#[test]
fn sequence_on_string_field_skips_file() {
    let mut release = Release::default();
    let res = resolver()
        .with_document(YamlText::new("version: [1, 2]\nport: 8080\n"))
        .resolve_with_report(&mut release)
        .unwrap();

    assert_eq!(release.version, "");
    assert_eq!(release.port, 0);
    assert!(matches!(res.file, FileOutcome::Skipped { .. }));
}
