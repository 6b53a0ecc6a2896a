use super::*;

#[test]
fn test_parse_hex_and_names() {
    assert_eq!("#8181df".parse::<Rgb>(), Ok(Rgb::new(0x81, 0x81, 0xdf)));
    assert_eq!("#0f8".parse::<Rgb>(), Ok(Rgb::new(0x00, 0xff, 0x88)));
    assert_eq!("cyan".parse::<Rgb>(), Ok(Rgb::new(0, 255, 255)));
    assert_eq!(" White ".parse::<Rgb>(), Ok(Rgb::WHITE));
    assert!("8181df".parse::<Rgb>().is_err());
    assert!("#12345".parse::<Rgb>().is_err());
    assert!("#gg0000".parse::<Rgb>().is_err());
}

#[test]
fn test_css_and_hex_forms() {
    let c = Rgb::new(51, 51, 153);
    assert_eq!(c.css(), "rgb(51, 51, 153)");
    assert_eq!(c.hex(), "#333399");
    assert_eq!(c.to_string(), "#333399");
}

#[test]
fn test_lerp_rounds_and_clamps() {
    let a = Rgb::new(0, 0, 0);
    let b = Rgb::new(255, 10, 1);
    assert_eq!(a.lerp(b, 0.5), Rgb::new(128, 5, 1));
    assert_eq!(a.lerp(b, 2.0), b);
    assert_eq!(a.lerp(b, -1.0), a);
    assert_eq!(a.lerp(b, f64::NAN), a);
}

#[test]
fn test_ramp_deserialises_from_strings() {
    let ramp: ColorRamp = serde_json::from_str(r##"{"low":"#000000","high":"orange"}"##).unwrap();
    assert_eq!(ramp.low, Rgb::BLACK);
    assert_eq!(ramp.high, Rgb::new(255, 165, 0));
    let json = serde_json::to_string(&ramp).unwrap();
    assert_eq!(json, r##"{"low":"#000000","high":"#ffa500"}"##);
}
