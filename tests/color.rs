mod tests {
    use myrtio_blossom::color::{self, Rgb, blend_colors, brightness, rgb2hsv};

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_blend_colors() {
        assert_eq!(blend_colors(RED, BLUE, 0), RED);
        assert_eq!(blend_colors(RED, BLUE, 255), BLUE);
        assert_eq!(
            blend_colors(RED, BLUE, 128),
            Rgb {
                r: 127,
                g: 0,
                b: 128
            }
        );
        assert_eq!(blend_colors(WHITE, BLACK, 255), BLACK);
        assert_eq!(blend_colors(WHITE, BLACK, 0), WHITE);
    }

    #[test]
    fn test_brightness() {
        assert_eq!(brightness(BLACK), 0);
        assert_eq!(brightness(WHITE), 255);
        let warm = Rgb {
            r: 200,
            g: 10,
            b: 5,
        };
        assert_eq!(brightness(warm), 71);
        assert_eq!(brightness(Rgb { r: 1, g: 0, b: 0 }), 0);
    }

    #[test]
    fn test_rgb2hsv() {
        let red = rgb2hsv(RED);
        assert_eq!((red.hue, red.sat, red.val), (0, 255, 255));

        let green = rgb2hsv(Rgb { r: 0, g: 255, b: 0 });
        assert_eq!((green.hue, green.sat, green.val), (85, 255, 255));

        let gray = rgb2hsv(Rgb {
            r: 10,
            g: 10,
            b: 10,
        });
        assert_eq!((gray.hue, gray.sat, gray.val), (0, 0, 10));
    }

    #[test]
    fn test_candle_color_is_lit() {
        assert!(brightness(color::CANDLE_COLOR) > 0);
    }
}
