use std::collections::HashMap;
use std::sync::Arc;

use tagcheck::{Record, Validator};

#[derive(Record, Clone)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Record)]
struct Shape {
    #[check(shape = "required")]
    points: Vec<Point>,
    #[check(shape = "eq=origin")]
    center: Box<Point>,
    origin: Arc<Point>,
    labels: HashMap<String, Option<String>>,
    grid: [[u8; 2]; 2],
}

fn main() {
    let v = Validator::new();
    v.register_schema("shape");
    let origin = Point { x: 0, y: 0 };
    let shape = Shape {
        points: vec![origin.clone()],
        center: Box::new(origin.clone()),
        origin: Arc::new(origin),
        labels: HashMap::new(),
        grid: [[0; 2]; 2],
    };
    assert!(v.validate("shape", &shape).is_empty());
}
