use tagcheck::Record;

#[derive(Record)]
struct Pair(String, String);

fn main() {}
