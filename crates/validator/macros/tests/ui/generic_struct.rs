#![allow(dead_code)]

use sift_validator::Structure;

#[derive(Structure)]
struct Wrapper<T> {
    inner: T,
}

fn main() {}
