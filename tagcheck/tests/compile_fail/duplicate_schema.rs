use tagcheck::Record;

#[derive(Record)]
struct Form {
    #[check(signup = "required")]
    #[check(signup = "notblank")]
    name: String,
}

fn main() {}
