use tagcheck::Record;

#[derive(Record)]
struct Form {
    #[check(signup = 1)]
    name: String,
}

fn main() {}
