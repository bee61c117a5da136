use chatdeck_cli::Theme;

#[test]
fn test_by_name_covers_all_names() {
    for name in Theme::all_names() {
        assert_eq!(Theme::by_name(name).name, *name);
    }
}

#[test]
fn test_unknown_theme_falls_back_to_dark() {
    assert_eq!(Theme::by_name("solarized").name, "dark");
}

#[test]
fn test_for_mode() {
    assert_eq!(Theme::for_mode(true).name, "dark");
    assert_eq!(Theme::for_mode(false).name, "light");
}
