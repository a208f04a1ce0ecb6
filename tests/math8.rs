mod tests {
    use myrtio_blossom::math8::{blend8, ease_in_out_cubic, lerp, unit8};

    #[test]
    fn test_blend8() {
        assert_eq!(blend8(255, 128, 128), 191);
        assert_eq!(blend8(0, 128, 255), 128);
        assert_eq!(blend8(255, 0, 128), 127);
        assert_eq!(blend8(255, 128, 0), 255);
        assert_eq!(blend8(0, 200, 255), 200);
    }

    #[test]
    fn test_unit8() {
        assert_eq!(unit8(0.0), 0);
        assert_eq!(unit8(0.5), 128);
        assert_eq!(unit8(1.0), 255);
        assert_eq!(unit8(-1.0), 0);
        assert_eq!(unit8(2.0), 255);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(1000.0, 2000.0, 0.25), 1250.0);
        assert_eq!(lerp(2000.0, 1000.0, 1.0), 1000.0);
    }

    #[test]
    fn test_ease_in_out_cubic() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.25), 0.0625);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(0.75), 0.9375);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }
}
