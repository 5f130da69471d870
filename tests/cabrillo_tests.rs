use adif2cabrillo::{from_path, parse, to_string, Config, Error, Renderer, Templates};
use std::path::PathBuf;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn test_field_day_demo() {
    let config = Config::load(demo("config.toml")).unwrap();
    let doc = from_path(demo("sample.adi")).unwrap();

    assert_eq!(doc.header().get_str("PROGRAMID"), Some("N1MM+"));
    assert_eq!(doc.len(), 2);

    let cabrillo = to_string(&config, &doc).unwrap();
    let expected = "\
START-OF-LOG: 3.0
CREATED-BY: adif2cabrillo
CALLSIGN: W1AW
CONTEST: ARRL-FD
CATEGORY-OPERATOR: MULTI-OP
CATEGORY-POWER: LOW
LOCATION: CT
CLUB: Newington Amateur Radio League
OPERATORS: W1AW K1ABC

QSO: 14025 CW 2024-06-22 1803 W1AW          3A  CT  K1ABC         1D  EMA
QSO:  7185 PH 2024-06-22 1811 W1AW          3A  CT  N0AX          2A  WWA
END-OF-LOG:
";
    assert_eq!(cabrillo, expected);
}

#[test]
fn test_one_line_per_qso() {
    let config = Config::new(Templates::new("H", "{{ CALL }}", "F"));
    let doc = parse(
        "<CALL:1>A<QSO_DATE:8>20240101<TIME_ON:4>0000<eor>\
         <CALL:1>B<QSO_DATE:8>20240101<TIME_ON:4>0001<eor>\
         <CALL:1>C<QSO_DATE:8>20240101<TIME_ON:4>0002<eor>",
    );

    let out = to_string(&config, &doc).unwrap();
    assert_eq!(out, "H\n\nA\nB\nC\nF\n");
}

#[test]
fn test_header_uses_variables_only() {
    let config = Config::new(Templates::new(
        "CALLSIGN: {{ CALLSIGN }} [{{ CALL }}]",
        "{{ CALL }}",
        "F",
    ))
    .with_variable("CALLSIGN", "K1ABC");
    let renderer = Renderer::new(&config).unwrap();
    assert_eq!(renderer.render_header().unwrap(), "CALLSIGN: K1ABC []");
}

#[test]
fn test_date_filter_in_line() {
    let config = Config::new(Templates::new("H", "{{ QSO_DATE|date }} {{ TIME_ON }}", "F"));
    let doc = parse("<QSO_DATE:8>20240229<TIME_ON:4>2359<eor>");
    let renderer = Renderer::new(&config).unwrap();
    assert_eq!(
        renderer.render_line(&doc.records()[0]).unwrap(),
        "2024-02-29 2359"
    );
}

#[test]
fn test_missing_timestamp_aborts() {
    let config = Config::new(Templates::new("H", "{{ CALL }}", "F"));
    let doc = parse("<CALL:4>W1AW<QSO_DATE:8>20240101<TIME_ON:4>0000<eor><CALL:5>K1ABC<eor>");

    assert_eq!(
        to_string(&config, &doc),
        Err(Error::MissingField("QSO_DATE".to_string()))
    );
}

#[test]
fn test_filter_error_is_template_error() {
    let config = Config::new(Templates::new("H", "{{ CALL|lpad(5, 'ab') }}", "F"));
    let doc = parse("<CALL:4>W1AW<QSO_DATE:8>20240101<TIME_ON:4>0000<eor>");
    assert!(matches!(to_string(&config, &doc), Err(Error::Template(_))));
}

#[test]
fn test_empty_log_is_rejected() {
    let doc = parse("<PROGRAMID:4>test<eoh>   <eor>  ");
    assert_eq!(doc.require_records(), Err(Error::EmptyResult));
}

#[test]
fn test_missing_adif_file() {
    let err = from_path(demo("does-not-exist.adi")).unwrap_err();
    assert!(err.is_input_error());
    assert!(err.to_string().contains("does-not-exist.adi"));
}
