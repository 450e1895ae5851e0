//! Tests for EAD XML serialization.

use chrono::NaiveDate;
use gather_core::{BuildOptions, DocumentBuilder, SheetDocument, SheetStats};
use gather_model::{CellValue, DocumentNode, Element, FieldLayout, LookupTable, Row, Worksheet};
use gather_output::{XmlOptions, render_to_string, write_sheet_document};
use tempfile::TempDir;

fn record_tree() -> Element {
    Element::new("ead")
        .with_child(DocumentNode::comment("New record starts here A/1"))
        .with_child(
            Element::new("eadheader")
                .with_attr("StartRecord", "1")
                .with_child(
                    Element::new("eadid")
                        .with_text("A/1")
                        .with_attr("tid", "A_1_1"),
                )
                .with_child(Element::new("filedesc").with_child(Element::new("titleproper"))),
        )
        .with_child(
            Element::new("archdesc")
                .with_attr("level", "Item")
                .with_child(Element::new("accessrestrict").with_child(Element::new("p").with_text(""))),
        )
}

#[test]
fn compact_document_snapshot() {
    let xml = render_to_string(&record_tree(), &XmlOptions::compact()).unwrap();
    insta::assert_snapshot!(xml, @r#"<?xml version="1.0" encoding="UTF-8"?><ead:ead xmlns:ead="urn:isbn:1-931666-22-9" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><!--New record starts here A/1--><ead:eadheader StartRecord="1"><ead:eadid tid="A_1_1">A/1</ead:eadid><ead:filedesc><ead:titleproper/></ead:filedesc></ead:eadheader><ead:archdesc level="Item"><ead:accessrestrict><ead:p></ead:p></ead:accessrestrict></ead:archdesc></ead:ead>"#);
}

#[test]
fn control_characters_never_reach_the_document() {
    let tree = Element::new("ead")
        .with_child(DocumentNode::comment("record\u{7}A/1"))
        .with_child(
            Element::new("p")
                .with_attr("label", "Former\u{1F} reference")
                .with_text("a\u{0B}b\u{1}c"),
        );
    let xml = render_to_string(&tree, &XmlOptions::compact()).unwrap();
    assert!(xml.contains("<!--recordA/1-->"));
    assert!(xml.contains(r#"<ead:p label="Former reference">abc</ead:p>"#));
    assert!(!xml.chars().any(|c| c.is_control()));
}

#[test]
fn pretty_output_nests_by_two_spaces() {
    let xml = render_to_string(&record_tree(), &XmlOptions::default()).unwrap();
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains("\n  <!--New record starts here A/1-->"));
    assert!(xml.contains("\n  <ead:eadheader StartRecord=\"1\">"));
    assert!(xml.contains("\n    <ead:eadid tid=\"A_1_1\">A/1</ead:eadid>"));
}

#[test]
fn markup_in_cell_text_is_escaped() {
    let root = Element::new("ead").with_child(Element::new("p").with_text("Letters & <notes>"));
    let xml = render_to_string(&root, &XmlOptions::compact()).unwrap();
    assert!(xml.contains("<ead:p>Letters &amp; &lt;notes&gt;</ead:p>"));
}

#[test]
fn sheet_document_is_written_under_its_name() {
    let dir = TempDir::new().unwrap();
    let document = SheetDocument {
        sheet_name: "IOR_L_PS_5_270".to_string(),
        root: record_tree(),
        records: 1,
        stats: SheetStats::default(),
    };
    let path = write_sheet_document(&dir.path().join("out"), &document, &XmlOptions::default())
        .expect("write document");
    assert_eq!(path, dir.path().join("out").join("IOR_L_PS_5_270.xml"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("<ead:eadid tid=\"A_1_1\">A/1</ead:eadid>"));
}

#[test]
fn built_worksheet_serializes_every_record() {
    let mut header = vec![CellValue::text("h"); 80];
    header[2] = CellValue::text("Note type");
    let mut record = vec![CellValue::Empty; 80];
    record[5] = CellValue::text("Mss Eur F111");
    record[10] = CellValue::text("Papers");
    let sheet = Worksheet::new(
        "Mss_Eur",
        vec![Row::new(header), Row::new(record.clone()), Row::new(record)],
    );
    let exported = NaiveDate::from_ymd_opt(2024, 1, 11)
        .and_then(|date| date.and_hms_opt(10, 35, 56))
        .unwrap();
    let layout = FieldLayout::default();
    let table = LookupTable::default();
    let document = DocumentBuilder::new(&layout, &table, BuildOptions::new(exported))
        .build_sheet(&sheet)
        .unwrap();

    let xml = render_to_string(&document.root, &XmlOptions::compact()).unwrap();
    assert_eq!(xml.matches("<!--New record starts here Mss Eur F111-->").count(), 2);
    assert_eq!(xml.matches("<ead:eadheader ").count(), 2);
    assert!(xml.contains(r#"<ead:eadid tid="Mss_Eur_F111_1">Mss Eur F111</ead:eadid>"#));
    assert!(xml.contains(r#"<ead:date tid="Mss_Eur_F111_2" type="exported">2024-01-11T10:35:56</ead:date>"#));
    assert!(xml.contains(r#"<ead:note type="Note type"><ead:p></ead:p></ead:note>"#));
}
