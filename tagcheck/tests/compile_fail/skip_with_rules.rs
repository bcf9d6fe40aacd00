use tagcheck::Record;

#[derive(Record)]
struct Form {
    #[check(skip)]
    #[check(signup = "required")]
    name: String,
}

fn main() {}
