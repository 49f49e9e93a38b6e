use jt_engine::{Color, ColorMode, EnvelopeVersion, JtFile, PaletteColor, PixelDocument, SaveOptions, Size};

const RED: Color = Color::new(255, 0, 0);

#[test]
fn test_static_indexed_round_trip() {
    let mut document = PixelDocument::new(ColorMode::Indexed3Bit, (8, 8), Color::default());
    for y in 0..8 {
        document.frames[0].set_pixel(3, y, RED);
    }
    let file = JtFile {
        document,
        options: SaveOptions::new(),
    };

    let json = file.serialize().unwrap();
    let parsed = JtFile::parse(&json).unwrap();
    assert_eq!(parsed, file);
}

#[test]
fn test_animation_rgb_round_trip_keeps_hints() {
    let mut document = PixelDocument::new(ColorMode::Rgb24Bit, (48, 24), Color::default());
    document.frames[0].set_pixel(30, 20, Color::new(1, 2, 3));
    document.frames.push(document.frames[0].clone());
    document.frames[1].set_pixel(0, 0, Color::new(200, 100, 50));
    document.frame_delay_ms = 120;

    let mut options = SaveOptions::new();
    options.speed = 100;
    options.mode = 2;
    options.stay_time = 5;
    let file = JtFile { document, options };

    let json = file.serialize().unwrap();
    let parsed = JtFile::parse(&json).unwrap();
    assert_eq!(parsed.document, file.document);
    assert_eq!(parsed.options.speed, 100);
    assert_eq!(parsed.options.mode, 2);
    assert_eq!(parsed.options.stay_time, 5);
}

#[test]
fn test_16x64_panel_writes_v2_field_order() {
    let document = PixelDocument::new(ColorMode::Indexed3Bit, (64, 16), Color::default());
    let mut options = SaveOptions::new();
    options.version = EnvelopeVersion::for_size(document.size());
    assert_eq!(options.version, EnvelopeVersion::V2);

    let json = JtFile { document, options }.serialize().unwrap();
    assert!(json.contains("\"stayTime\":3,\"graffitiData\":["));

    let parsed = JtFile::parse(&json).unwrap();
    assert_eq!(parsed.options.version, EnvelopeVersion::V2);
}

#[test]
fn test_parse_known_static_file() {
    let json = r#"[{"data":{"graffitiData":[128,0,0],"graffitiType":1,"mode":1,"pixelHeight":8,"pixelWidth":1,"speed":255,"stayTime":3},"dataType":1}]"#;
    let file = JtFile::parse(json).unwrap();

    assert_eq!(file.document.size(), Size::new(1, 8));
    assert_eq!(file.document.color_mode, ColorMode::Indexed3Bit);
    assert_eq!(file.document.frames[0].get_pixel(0, 0), PaletteColor::Red.into());
    for y in 1..8 {
        assert_eq!(file.document.frames[0].get_pixel(0, y), PaletteColor::Black.into());
    }
}

#[test]
fn test_animation_without_delays_defaults_to_250ms() {
    let json = r#"[{"data":{"aniData":[128,0,0,0,0,0],"aniType":1,"frameNum":2,"pixelHeight":8,"pixelWidth":1},"dataType":0}]"#;
    let file = JtFile::parse(json).unwrap();

    assert_eq!(file.document.frame_count(), 2);
    assert_eq!(file.document.frame_delay_ms, 250);
    assert_eq!(file.document.frames[0].get_pixel(0, 0), PaletteColor::Red.into());
    assert_eq!(file.document.frames[1].get_pixel(0, 0), PaletteColor::Black.into());
}
