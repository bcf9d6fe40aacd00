use tagcheck::Record;

#[derive(Record)]
struct Wrapper<T> {
    inner: T,
}

fn main() {}
