use super::*;
use crate::document::{PlaceholderKind, SlideSize};
use std::path::Path;

fn request(slides: Vec<SlideRecord>) -> BuildRequest {
    BuildRequest::new("Deck", "Academic", slides, Path::new("unused.pptx"))
}

#[test]
fn test_resolve_known_themes() {
    let expected = [
        ("Business Professional", (255, 255, 255), (31, 73, 125), (0, 0, 0), (79, 129, 189)),
        ("Creative & Modern", (242, 242, 242), (255, 0, 110), (51, 51, 51), (131, 56, 236)),
        ("Academic", (255, 255, 255), (0, 51, 102), (0, 0, 0), (0, 102, 204)),
        ("Minimalist", (250, 250, 250), (80, 80, 80), (100, 100, 100), (200, 200, 200)),
        ("Bold & Vibrant", (0, 0, 0), (255, 190, 11), (255, 255, 255), (251, 86, 7)),
    ];
    let rgb = |(r, g, b): (u8, u8, u8)| RgbColor::new(r, g, b);

    assert_eq!(expected.len(), Theme::ALL.len());
    for (theme, (name, background, title, body, accent)) in Theme::ALL.into_iter().zip(expected) {
        assert_eq!(theme.name(), name);
        let palette = resolve(name);
        assert_eq!(palette, theme.palette());
        assert_eq!(palette.background, rgb(background), "{} background", name);
        assert_eq!(palette.title, rgb(title), "{} title", name);
        assert_eq!(palette.body, rgb(body), "{} body", name);
        assert_eq!(palette.accent, rgb(accent), "{} accent", name);
    }
}

#[test]
fn test_resolve_unknown_falls_back_to_business_professional() {
    let baseline = Theme::BusinessProfessional.palette();
    assert_eq!(baseline.title, RgbColor::new(31, 73, 125));
    assert_eq!(baseline.accent, RgbColor::new(79, 129, 189));

    for name in ["", "academic", "Business professional", "Neon", " Academic"] {
        assert_eq!(resolve(name), baseline, "style {:?} should fall back", name);
    }
}

#[test]
fn test_theme_names_round_trip() {
    for theme in Theme::ALL {
        assert_eq!(Theme::from_name(theme.name()), Some(theme));
        assert_eq!(theme.to_string(), theme.name());
    }
    assert_eq!(Theme::from_name("Creative and Modern"), None);
}

#[test]
fn test_parse_slides_content_shapes() {
    let json = r#"[
        {"title": "Bullets", "content": ["One", "Two"]},
        {"title": "Text", "content": "Just text", "notes": "Say hi"},
        {"title": "Empty"}
    ]"#;
    let slides = parse_slides(json).unwrap();

    assert_eq!(slides.len(), 3);
    assert_eq!(
        slides[0].content,
        SlideContent::Bullets(vec!["One".to_string(), "Two".to_string()])
    );
    assert_eq!(slides[0].notes, None);
    assert_eq!(slides[1].content, SlideContent::Paragraph("Just text".to_string()));
    assert_eq!(slides[1].notes.as_deref(), Some("Say hi"));
    assert_eq!(slides[2].content, SlideContent::Bullets(Vec::new()));
    assert!(slides[2].content.is_empty());
}

#[test]
fn test_parse_slides_coerces_non_string_content() {
    let json = r#"[
        {"title": "Number", "content": 42},
        {"title": "Object", "content": {"a": 1}},
        {"title": "Mixed", "content": ["text", 3, true]},
        {"title": "Null", "content": null, "notes": null}
    ]"#;
    let slides = parse_slides(json).unwrap();

    assert_eq!(slides[0].content, SlideContent::Paragraph("42".to_string()));
    assert_eq!(slides[1].content, SlideContent::Paragraph(r#"{"a":1}"#.to_string()));
    assert_eq!(
        slides[2].content,
        SlideContent::Bullets(vec!["text".to_string(), "3".to_string(), "true".to_string()])
    );
    assert_eq!(slides[3].content, SlideContent::Bullets(Vec::new()));
    assert_eq!(slides[3].notes, None);
}

#[test]
fn test_parse_slides_missing_title_defaults_to_empty() {
    let slides = parse_slides(r#"[{"content": "Body only"}]"#).unwrap();
    assert_eq!(slides[0].title, "");
}

#[test]
fn test_parse_slides_accepts_envelope() {
    let bare = parse_slides(r#"[{"title": "A", "content": ["x"]}]"#).unwrap();
    let wrapped = parse_slides(r#"{"slides": [{"title": "A", "content": ["x"]}]}"#).unwrap();
    assert_eq!(bare, wrapped);
}

#[test]
fn test_parse_slides_rejects_bad_shapes() {
    for json in [
        "not json",
        "42",
        r#""slides""#,
        r#"{"title": "no slides key"}"#,
        r#"[{"title": 7, "content": "x"}]"#,
        r#"[{"title": "x", "notes": ["not", "a", "string"]}]"#,
        r#"["just a string"]"#,
    ] {
        match parse_slides(json) {
            Err(SlidegenError::InputError(_)) => {}
            other => panic!("expected InputError for {}, got {:?}", json, other),
        }
    }
}

#[test]
fn test_load_slides_missing_file() {
    let result = load_slides(Path::new("/nonexistent/slides.json"));
    assert!(matches!(result, Err(SlidegenError::InputError(_))));
}

#[test]
fn test_rgb_color_hex() {
    let color = RgbColor::new(31, 73, 125);
    assert_eq!(color.to_hex(), "1F497D");
    assert_eq!(RgbColor::from_hex("1F497D"), Some(color));
    assert_eq!(RgbColor::from_hex("1f497d"), Some(color));
    assert_eq!(RgbColor::from_hex("12345"), None);
    assert_eq!(RgbColor::from_hex("GGGGGG"), None);
    assert_eq!(color.to_string(), "#1F497D");
}

#[test]
fn test_presentation_layouts_and_slides() {
    let mut presentation = Presentation::new();
    assert_eq!(presentation.layouts().len(), 2);
    assert_eq!(presentation.layouts()[0].name, "Title Slide");
    assert_eq!(presentation.layouts()[1].name, "Title and Content");

    let slide = presentation.add_slide(1).unwrap();
    assert!(slide.has_placeholder(0));
    assert!(slide.has_placeholder(1));
    assert!(!slide.has_placeholder(2));
    assert_eq!(slide.title().map(|t| t.kind()), Some(PlaceholderKind::Title));

    assert!(matches!(
        presentation.add_slide(5),
        Err(SlidegenError::LayoutNotFound(5))
    ));
    assert_eq!(presentation.slides().len(), 1);
}

#[test]
fn test_text_frame_operations() {
    let mut presentation = Presentation::new();
    let slide = presentation.add_slide(1).unwrap();
    let frame = slide.placeholder_mut(1).unwrap().text_frame_mut();

    frame.set_text("first\nsecond");
    assert_eq!(frame.paragraphs().len(), 2);
    assert_eq!(frame.text(), "first\nsecond");

    frame.clear();
    assert!(frame.paragraphs().is_empty());

    let paragraph = frame.add_paragraph();
    paragraph.set_text("deep").set_level(12);
    assert_eq!(paragraph.level(), 8);
    assert_eq!(frame.paragraphs().len(), 1);
}

#[test]
fn test_assemble_slide_count_and_order() {
    let slides = vec![
        SlideRecord::new("One", "a"),
        SlideRecord::new("Two", vec!["b", "c"]),
        SlideRecord::new("Three", "d"),
    ];
    let palette = resolve("Academic");
    let presentation = assemble_presentation(&request(slides), &palette, &Config::new()).unwrap();

    let titles: Vec<String> = presentation
        .slides()
        .iter()
        .map(|s| s.title().unwrap().text_frame().text())
        .collect();
    assert_eq!(titles, vec!["Deck", "One", "Two", "Three"]);
    assert_eq!(presentation.slides()[0].layout_index(), 0);
    assert!(presentation.slides()[1..].iter().all(|s| s.layout_index() == 1));
    assert!(presentation
        .slides()
        .iter()
        .all(|s| s.background() == Some(palette.background)));
}

#[test]
fn test_assemble_title_slide_styling() {
    let palette = resolve("Academic");
    let presentation = assemble_presentation(&request(Vec::new()), &palette, &Config::new()).unwrap();
    let slide = &presentation.slides()[0];

    let title = &slide.title().unwrap().text_frame().paragraphs()[0];
    assert_eq!(title.text(), "Deck");
    assert_eq!(title.font.color, Some(palette.title));
    assert_eq!(title.font.size, Some(44.0));
    assert_eq!(title.font.bold, Some(true));

    let subtitle = &slide.placeholders()[1].text_frame().paragraphs()[0];
    assert_eq!(subtitle.text(), "Style: Academic");
    assert_eq!(subtitle.font.color, Some(palette.accent));
    assert_eq!(subtitle.font.size, Some(24.0));
    assert_eq!(subtitle.bullet, Some(false));
}

#[test]
fn test_assemble_subtitle_uses_raw_style_name() {
    let slides = Vec::new();
    let request = BuildRequest::new("Deck", "Neon", slides, Path::new("unused.pptx"));
    let palette = resolve(&request.style);
    let presentation = assemble_presentation(&request, &palette, &Config::new()).unwrap();

    assert_eq!(palette, Theme::BusinessProfessional.palette());
    assert_eq!(
        presentation.slides()[0].placeholders()[1].text_frame().text(),
        "Style: Neon"
    );
}

#[test]
fn test_assemble_body_content() {
    let slides = vec![
        SlideRecord::new("Bullets", vec!["Point A", "Point B", "Point C"]),
        SlideRecord::new("Text", "All good.").with_notes("Wrap up"),
        SlideRecord::new("Nothing", SlideContent::default()),
    ];
    let palette = resolve("Minimalist");
    let presentation = assemble_presentation(&request(slides), &palette, &Config::new()).unwrap();

    let bullets = presentation.slides()[1].placeholders()[1].text_frame().paragraphs();
    assert_eq!(bullets.len(), 3);
    assert_eq!(bullets[2].text(), "Point C");
    for paragraph in bullets {
        assert_eq!(paragraph.bullet, Some(true));
        assert_eq!(paragraph.level(), 0);
        assert_eq!(paragraph.font.color, Some(palette.body));
        assert_eq!(paragraph.font.size, Some(24.0));
    }
    assert_eq!(presentation.slides()[1].notes(), None);

    let text = presentation.slides()[2].placeholders()[1].text_frame().paragraphs();
    assert_eq!(text.len(), 1);
    assert_eq!(text[0].text(), "All good.");
    assert_eq!(text[0].bullet, Some(false));
    assert_eq!(presentation.slides()[2].notes(), Some("Wrap up"));

    let title = &presentation.slides()[2].title().unwrap().text_frame().paragraphs()[0];
    assert_eq!(title.font.size, Some(36.0));
    assert_eq!(title.font.bold, Some(true));

    assert!(presentation.slides()[3].placeholders()[1]
        .text_frame()
        .paragraphs()
        .is_empty());
}

#[test]
fn test_config_slide_size() {
    assert_eq!(Config::new().slide_size(), SlideSize::STANDARD_4X3);
    assert_eq!(
        Config::new()
            .with_aspect_ratio(Some("16:9".to_string()))
            .slide_size(),
        SlideSize::WIDESCREEN_16X9
    );
    assert_eq!(
        Config::new()
            .with_aspect_ratio(Some("21:9".to_string()))
            .slide_size(),
        SlideSize::STANDARD_4X3
    );
    assert_eq!(Config::new().with_aspect_ratio(None), Config::new());
}

#[test]
fn test_placeholder_frame_scales_with_slide_height() {
    let standard = template::placeholder_frame(PlaceholderKind::Body, SlideSize::STANDARD_4X3);
    assert_eq!(standard, (457_200, 1_600_200, 8_229_600, 4_525_963));

    let wide = template::placeholder_frame(PlaceholderKind::Body, SlideSize::WIDESCREEN_16X9);
    assert_eq!(wide.0, standard.0);
    assert_eq!(wide.2, standard.2);
    assert_eq!(wide.1, 1_600_200 * 5_143_500 / 6_858_000);
    assert_eq!(SlideSize::WIDESCREEN_16X9.type_name(), "screen16x9");
}

#[test]
fn test_escape_text_control_characters() {
    assert_eq!(pptx::escape_text("R&D <Q1>"), "R&amp;D &lt;Q1&gt;");
    assert_eq!(pptx::escape_text("T\u{1}"), "T_x0001_");
    assert_eq!(pptx::escape_text("x\u{8}y\u{1F}"), "x_x0008_y_x001F_");
    assert_eq!(pptx::escape_text("\u{0}\u{C}\u{FFFF}"), "_x0000__x000C__xFFFF_");
    // Tab, newline and carriage return are legal XML
    assert_eq!(pptx::escape_text("a\tb\nc\rd"), "a\tb\nc\rd");
}
