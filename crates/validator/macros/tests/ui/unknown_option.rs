#![allow(dead_code)]

use sift_validator::Structure;

#[derive(Structure)]
struct Signup {
    #[validate(required)]
    name: String,
}

fn main() {}
