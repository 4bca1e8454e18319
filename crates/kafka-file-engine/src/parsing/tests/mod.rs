//! Parser tests over whole documents.
//!
//! Outlines are asserted with inline `insta` snapshots; every parsed fixture
//! also goes through the invariant checks.


use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::model::PropertyCatalog;
use crate::parsing::ast::{Block, KafkaFileDocument};
use crate::parsing::parse_kafka_file;
use crate::parsing::snapshot::{self, render};
use crate::parsing::text::RopeDocument;

pub(crate) fn parse(text: &str) -> KafkaFileDocument {
    let doc = RopeDocument::kafka("file:///test.kafka", text);
    let tree = parse_kafka_file(&doc, &PropertyCatalog::default());
    snapshot::invariants(&tree);
    tree
}

#[test]
fn separated_producers() {
    assert_snapshot!(render(&parse("PRODUCER\n###\nPRODUCER")), @r"
    Document 0:0..2:8
      ProducerBlock 0:0..0:8
      ProducerBlock 2:0..2:8
    ");
}

#[test]
fn producer_with_properties_and_value() {
    let text = "PRODUCER keyed-message\n\
                topic: orders\n\
                key: id-{{$random.uuid}}\n\
                -- a comment\n\
                \n\
                {\"amount\": {{$random.number}}}";
    assert_snapshot!(render(&parse(text)), @r#"
    Document 0:0..5:30
      ProducerBlock 0:0..5:30
        Property 1:0..1:13
          PropertyKey 1:0..1:5 "topic"
          PropertyValue 1:6..1:13 " orders"
        Property 2:0..2:24
          PropertyKey 2:0..2:3 "key"
          PropertyValue 2:4..2:24 " id-{{$random.uuid}}"
            MustacheExpression 2:8..2:24
        ProducerValue 5:0..5:30 "{\"amount\": {{$random.number}}}"
          MustacheExpression 5:11..5:29
    "#);
}

#[test]
fn consumers_with_unknown_and_broken_properties() {
    let text = "CONSUMER group-a\n\
                topic: orders\n\
                from: earliest\n\
                unknown-prop: x\n\
                missing assigner\n\
                CONSUMER group-b";
    assert_snapshot!(render(&parse(text)), @r#"
    Document 0:0..5:16
      ConsumerBlock 0:0..4:16
        ConsumerGroupId 0:9..0:16 "group-a"
        Property 1:0..1:13
          PropertyKey 1:0..1:5 "topic"
          PropertyValue 1:6..1:13 " orders"
        Property 2:0..2:14
          PropertyKey 2:0..2:4 "from"
          PropertyValue 2:5..2:14 " earliest"
        Property 3:0..3:15
          PropertyKey 3:0..3:12 "unknown-prop"
          PropertyValue 3:13..3:15 " x"
        Property 4:0..4:16 (no assigner)
          PropertyKey 4:0..4:16 "missing assigner"
      ConsumerBlock 5:0..5:16
        ConsumerGroupId 5:9..5:16 "group-b"
    "#);
}

#[test]
fn unclosed_expression_is_recorded_on_the_chunk() {
    assert_snapshot!(render(&parse("PRODUCER\ntopic: t\n{{a")), @r#"
    Document 0:0..2:3
      ProducerBlock 0:0..2:3
        Property 1:0..1:8
          PropertyKey 1:0..1:5 "topic"
          PropertyValue 1:6..1:8 " t"
        ProducerValue 2:0..2:3 "{{a"
          unclosed MustacheExpression 2:0..2:3
    "#);
}

#[test]
fn empty_document() {
    let tree = parse("");
    assert!(tree.blocks().is_empty());
    assert_eq!(tree.range().to_string(), "0:0..0:0");
}

#[test]
fn blank_lines_only() {
    assert!(parse("\n\n\n").blocks().is_empty());
}

#[test]
fn crlf_document() {
    let tree = parse("PRODUCER\r\ntopic: a\r\n\r\nline one\r\nline two\r\n");
    let Block::Producer(producer) = &tree.blocks()[0] else {
        panic!("expected a producer block");
    };
    let value = producer.value().unwrap();
    assert_eq!(value.content(), "line one\r\nline two");
    assert_eq!(value.range().to_string(), "3:0..4:8");
    assert_eq!(producer.get_property_value("topic"), Some("a"));
}

#[test]
fn lone_carriage_return_stays_on_its_line() {
    let tree = parse("PRODUCER\nval\r{{x}}");
    assert_eq!(tree.range().to_string(), "0:0..1:9");
    let Block::Producer(producer) = &tree.blocks()[0] else {
        panic!("expected a producer block");
    };
    let value = producer.value().unwrap();
    assert_eq!(value.range().to_string(), "1:0..1:9");
    assert_eq!(value.expressions()[0].range().to_string(), "1:4..1:9");
}

#[test]
fn value_runs_to_the_separator() {
    let tree = parse("PRODUCER\nfirst\ntopic: not-a-property\n###\nCONSUMER g");
    let Block::Producer(producer) = &tree.blocks()[0] else {
        panic!("expected a producer block");
    };
    assert!(producer.properties().is_empty());
    assert_eq!(
        producer.value().map(|v| v.content()),
        Some("first\ntopic: not-a-property")
    );
    assert_eq!(tree.blocks().len(), 2);
}

#[test]
fn producer_header_text_is_not_special() {
    let tree = parse("PRODUCER my-name\ntopic: a");
    assert_eq!(tree.blocks()[0].get_property_value("topic"), Some("a"));
    assert_eq!(tree.blocks()[0].properties().len(), 1);
}

#[test]
fn first_property_match_wins() {
    let tree = parse("CONSUMER g\ntopic: first\ntopic: second");
    let block = &tree.blocks()[0];
    assert_eq!(block.get_property_value("topic"), Some("first"));
    assert_eq!(block.get_property("topic").unwrap().start().line, 1);
    assert!(block.get_property("partitions").is_none());
}

#[test]
fn property_definitions_resolve_through_the_catalog() {
    let catalog = PropertyCatalog::default();
    let tree = parse("CONSUMER g\nfrom: latest\nbogus: 1");
    let block = &tree.blocks()[0];
    let props = block.properties();
    let from = props[0].definition(&catalog, block.block_type()).unwrap();
    assert!(from.accepts("latest"));
    assert!(props[1].definition(&catalog, block.block_type()).is_none());
}

#[test]
fn custom_catalog_changes_producer_properties() {
    let mut catalog = PropertyCatalog::default();
    catalog.producer.retain(|d| d.name != "topic");
    let doc = RopeDocument::kafka("file:///custom.kafka", "PRODUCER\ntopic: a\nkey: b");
    let tree = parse_kafka_file(&doc, &catalog);
    let Block::Producer(producer) = &tree.blocks()[0] else {
        panic!("expected a producer block");
    };
    assert!(producer.properties().is_empty());
    assert_eq!(producer.value().unwrap().content(), "topic: a\nkey: b");
}
