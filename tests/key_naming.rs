// Key naming is a compatibility surface: deployed environments depend on
// these exact keys.
use envbind::{key_paths, normalize_key, Field, Kind, Record, Shape, UintWidth};
use pretty_assertions::assert_eq;

fn env_keys(shape: &Shape) -> Vec<String> {
    key_paths(shape).iter().map(|k| k.env_key()).collect()
}

#[test]
fn test_nested_key_composition() {
    let shape = Shape::new().field(Field::new(
        "Database",
        Kind::Record(Shape::new().field(Field::new("Host", Kind::String))),
    ));
    assert_eq!(env_keys(&shape), ["DATABASE__HOST"]);
}

#[test]
fn test_outer_override_replaces_prefix() {
    let shape = Shape::new().field(
        Field::new(
            "Database",
            Kind::Record(Shape::new().field(Field::new("Host", Kind::String))),
        )
        .with_key("db"),
    );
    assert_eq!(env_keys(&shape), ["DB__HOST"]);
}

#[test]
fn test_derived_names_are_snake_case() {
    assert_eq!(normalize_key("NewrelicEnabled"), "newrelic_enabled");
    assert_eq!(normalize_key("MemberAccount"), "member_account");
    assert_eq!(normalize_key("maxConns"), "max_conns");
}

#[test]
fn test_three_levels_deep() {
    let shape = Shape::new().field(Field::new(
        "Services",
        Kind::Record(Shape::new().field(Field::new(
            "OrderManagement",
            Kind::Record(
                Shape::new().field(Field::new("RetryLimit", Kind::Uint(UintWidth::U8))),
            ),
        ))),
    ));
    assert_eq!(
        env_keys(&shape),
        ["SERVICES__ORDER_MANAGEMENT__RETRY_LIMIT"]
    );
}

envbind::record! {
    struct Listener {
        bind_addr: String,
        port: u16 => "listen_port",
    }
}

envbind::record! {
    struct Server {
        public: Listener,
        admin: Listener => "ADMIN",
        worker_threads: usize,
    }
}

#[test]
fn test_record_macro_keys() {
    assert_eq!(
        env_keys(&Server::shape()),
        [
            "PUBLIC__BIND_ADDR",
            "PUBLIC__LISTEN_PORT",
            "ADMIN__BIND_ADDR",
            "ADMIN__LISTEN_PORT",
            "WORKER_THREADS",
        ]
    );
}

#[test]
fn test_keys_do_not_depend_on_lookup() {
    // same shape, same keys, every time
    assert_eq!(env_keys(&Server::shape()), env_keys(&Server::shape()));
    let paths: Vec<String> = key_paths(&Server::shape())
        .into_iter()
        .map(|k| k.path)
        .collect();
    assert_eq!(paths[2], "ADMIN__bind_addr");
}

envbind::record! {
    struct Resource {
        r#type: String,
        r#ref: u32 => "reference",
    }
}

#[test]
fn test_raw_identifiers_drop_their_prefix() {
    let shape = Resource::shape();
    assert_eq!(shape.fields()[0].name(), "type");
    assert_eq!(env_keys(&shape), ["TYPE", "REFERENCE"]);

    let env: &[(&str, &str)] = &[("TYPE", "queue"), ("REFERENCE", "7")];
    let res: Resource = envbind::load_from(env).unwrap();
    assert_eq!(res.r#type, "queue");
    assert_eq!(res.r#ref, 7);
}
