use std::sync::Arc;

use kafka_file_engine::parsing::snapshot;
use kafka_file_engine::{
    Block, CacheOptions, DocumentCache, KafkaFileDocument, Node, NodeKind, PropertyCatalog,
    RopeDocument, TextDocument, parse_kafka_file,
};
use pretty_assertions::assert_eq;

fn parse(text: &str) -> KafkaFileDocument {
    let doc = RopeDocument::kafka("file:///laws.kafka", text);
    let tree = parse_kafka_file(&doc, &PropertyCatalog::default());
    snapshot::invariants(&tree);
    tree
}

fn producer(block: &Block) -> &kafka_file_engine::ProducerBlock {
    match block {
        Block::Producer(p) => p,
        Block::Consumer(_) => panic!("expected a producer block"),
    }
}

/// Test that the same text parses to equal trees
#[test]
fn parsing_is_idempotent() {
    let text = "PRODUCER\ntopic: a\nkey: {{k}}\n{\"v\": 1}\n###\nCONSUMER g\nfrom: 0";
    assert_eq!(parse(text), parse(text));
}

#[test]
fn block_boundary_law() {
    let tree = parse("PRODUCER\n###\nPRODUCER");
    assert_eq!(tree.blocks().len(), 2);
    for block in tree.blocks() {
        assert_eq!(block.block_type(), kafka_file_engine::BlockType::Producer);
        assert_eq!(block.start().line, block.end().line);
        assert!(producer(block).value().is_none());
    }
}

#[test]
fn consumer_adjacency_law() {
    let tree = parse("CONSUMER g1\nCONSUMER g2");
    let ids: Vec<&str> = tree
        .blocks()
        .iter()
        .map(|b| match b {
            Block::Consumer(c) => c.consumer_group_id().content(),
            Block::Producer(_) => panic!("expected a consumer block"),
        })
        .collect();
    assert_eq!(ids, vec!["g1", "g2"]);
}

#[test]
fn property_split_law() {
    let tree = parse("CONSUMER g\ntopic:  abcd  ");
    let property = &tree.blocks()[0].properties()[0];
    assert_eq!(property.property_name(), Some("topic"));
    assert_eq!(property.property_value(), Some("abcd"));
    assert_eq!(property.value().map(|v| v.content()), Some("  abcd  "));
}

#[test]
fn value_takeover_law() {
    let tree = parse("PRODUCER\ntopic:abcd\nnot-a-property:xyz");
    let p = producer(&tree.blocks()[0]);
    assert_eq!(p.properties().len(), 1);
    assert_eq!(p.get_property_value("topic"), Some("abcd"));
    assert_eq!(p.value().map(|v| v.content()), Some("not-a-property:xyz"));
}

#[test]
fn mustache_pairing_law() {
    let tree = parse("PRODUCER\n{{a}}{{b}}");
    let value = producer(&tree.blocks()[0]).value().unwrap();
    let ranges: Vec<_> = value.expressions().iter().map(|e| e.range()).collect();
    assert_eq!(ranges.len(), 2);
    assert!(ranges[0].end <= ranges[1].start);

    let tree = parse("PRODUCER\n{{a");
    let value = producer(&tree.blocks()[0]).value().unwrap();
    assert!(value.expressions().is_empty());
    assert!(Node::DynamicChunk(value).children().is_empty());
    assert!(value.unclosed_expression().is_some());
}

#[test]
fn find_node_before_reaches_expressions() {
    let tree = parse("PRODUCER\nkey: {{a}}");
    let path = tree.find_node_before(kafka_file_engine::Position::new(1, 7));
    assert_eq!(path.kind(), NodeKind::MustacheExpression);
}

#[test]
fn cache_hit_law() {
    let cache = DocumentCache::for_kafka_files(CacheOptions::default(), PropertyCatalog::default());
    let doc = RopeDocument::kafka("file:///hit.kafka", "PRODUCER\ntopic: a");
    let first = cache.get(&doc);
    let second = cache.get(&doc);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn cache_eviction_law() {
    let max_entries = 3;
    let cache = DocumentCache::for_kafka_files(
        CacheOptions::from_seconds(max_entries, 0),
        PropertyCatalog::default(),
    );
    let docs: Vec<RopeDocument> = (0..=max_entries)
        .map(|i| RopeDocument::kafka(format!("file:///{i}.kafka"), "CONSUMER g"))
        .collect();

    for doc in &docs[..max_entries] {
        cache.get(doc);
    }
    // Refresh the first so the second becomes least recently accessed.
    cache.get(&docs[0]);
    cache.get(&docs[max_entries]);

    assert_eq!(cache.len(), max_entries);
    assert!(!cache.contains(docs[1].uri()));
    for i in [0, 2, 3] {
        assert!(cache.contains(docs[i].uri()));
    }
}
