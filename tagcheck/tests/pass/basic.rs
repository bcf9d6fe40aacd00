use tagcheck::{Record, Validator};

#[derive(Record)]
struct Login {
    #[check(login = "required,email")]
    email: String,
    #[check(login = "required, min=8")]
    password: String,
}

fn main() {
    let v = Validator::new();
    v.register_schema("login");
    let errors = v.validate(
        "login",
        &Login {
            email: "a@b.c".into(),
            password: "correct horse".into(),
        },
    );
    assert!(errors.is_empty());
}
