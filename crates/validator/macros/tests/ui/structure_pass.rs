use sift_validator::prelude::*;

#[derive(Structure, Default)]
#[serde(rename_all = "camelCase")]
struct Address {
    #[validate("required")]
    street_name: String,
}

#[derive(Structure, Default)]
struct Signup {
    #[validate("required")]
    #[validate("between:3:32")]
    #[serde(rename = "user_name")]
    name: String,
    #[validate("between:13:130")]
    age: u8,
    home_address: Address,
    #[validate(skip)]
    #[allow(dead_code)]
    session: Session,
}

#[derive(Default)]
struct Session;

#[derive(Structure)]
struct Marker;

fn main() {
    let validator = StructValidator::new::<Signup>().unwrap();
    let err = validator.validate(&Signup::default()).unwrap_err();
    let result = err.into_result().unwrap();

    assert_eq!(result.codes("user_name"), ["required", "between"]);
    assert_eq!(result.codes("age"), ["between"]);
    assert_eq!(result.codes("home_address.streetName"), ["required"]);
    assert!(validator.field("session").is_none());

    assert!(StructValidator::new::<Marker>().unwrap().validate(&Marker).is_ok());
}
