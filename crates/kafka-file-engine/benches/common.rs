/// Generates a kafka file with `blocks` alternating producer and consumer blocks.
pub fn generate_kafka_content(blocks: usize) -> String {
    let mut out = String::new();
    for i in 0..blocks {
        if i % 2 == 0 {
            out.push_str(&format!(
                "PRODUCER message-{i}\ntopic: orders-{i}\nkey: id-{{{{$random.uuid}}}}\nheaders: trace={i}\n\
                 {{\n  \"id\": {i},\n  \"amount\": {{{{$random.number}}}}\n}}\n###\n"
            ));
        } else {
            out.push_str(&format!(
                "CONSUMER group-{i}\ntopic: orders-{i}\nfrom: earliest\npartitions: 0-3\n-- comment\n\n"
            ));
        }
    }
    out
}
