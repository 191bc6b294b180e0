#![allow(dead_code)]

use sift_validator::Structure;

#[derive(Structure)]
enum Choice {
    A,
    B,
}

fn main() {}
