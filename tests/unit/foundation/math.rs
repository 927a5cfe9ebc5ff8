use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn unit_to_u8_floors_and_clamps() {
    assert_eq!(unit_to_u8_floor(0.0), 0);
    assert_eq!(unit_to_u8_floor(1.0), 255);
    assert_eq!(unit_to_u8_floor(0.8), 204);
    assert_eq!(unit_to_u8_floor(0.005), 1);
    assert_eq!(unit_to_u8_floor(0.0039), 0);
    assert_eq!(unit_to_u8_floor(-2.0), 0);
    assert_eq!(unit_to_u8_floor(7.0), 255);
    assert_eq!(unit_to_u8_floor(f64::NAN), 0);
}
