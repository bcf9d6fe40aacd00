use tagcheck::Record;

#[derive(Record)]
enum Choice {
    Yes,
    No,
}

fn main() {}
