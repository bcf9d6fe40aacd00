use tagcheck::{Record, Validator};

#[derive(Record)]
struct Profile {
    #[check(create = "required", update = "notblank")]
    #[check(admin = "min=2")]
    name: String,
    #[check(r#type = "required")]
    kind: Option<u8>,
    #[check(skip)]
    cache: Vec<u8>,
    untagged: bool,
}

fn main() {
    let profile = Profile {
        name: "Ada".into(),
        kind: Some(1),
        cache: Vec::new(),
        untagged: false,
    };
    let fields = profile.fields();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0].tag("admin"), Some("min=2"));
    assert_eq!(fields[1].tag("type"), Some("required"));
    assert!(Validator::new().validate("create", &profile).is_empty());
}
