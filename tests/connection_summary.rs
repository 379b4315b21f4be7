use storectl::{AddressSet, ClientResult, ConnectionSummary, ResultMap, sprint_conns, summarize};

const EXAMPLE_ERR: &str = "something went wrong";

fn addresses() -> AddressSet {
    ["1.2.3.4:10000", "1.2.3.5:10001"].into_iter().collect()
}

fn failed(addrs: &[&str]) -> ResultMap<()> {
    addrs
        .iter()
        .map(|a| ClientResult::failed(*a, EXAMPLE_ERR))
        .collect()
}

#[test]
fn test_has_connections() {
    let cases = vec![
        (
            addresses(),
            ResultMap::new(),
            "Active connections: [1.2.3.4:10000 1.2.3.5:10001]\n",
        ),
        (
            ["1.2.3.5:10001"].into_iter().collect(),
            failed(&["1.2.3.4:10000"]),
            "failed to connect to 1.2.3.4:10000 (something went wrong)\nActive connections: [1.2.3.5:10001]\n",
        ),
        (
            AddressSet::new(),
            failed(&["1.2.3.4:10000", "1.2.3.5:10001"]),
            "failed to connect to 1.2.3.4:10000 (something went wrong)\nfailed to connect to 1.2.3.5:10001 (something went wrong)\nActive connections: []\nNo active connections!",
        ),
    ];

    for (addrs, results, out) in cases {
        assert_eq!(summarize(&addrs, &results), out, "bad output");
    }
}

#[test]
fn test_sprint_connections() {
    let cases = vec![
        (
            addresses(),
            ResultMap::new(),
            "Active connections: [1.2.3.4:10000 1.2.3.5:10001]\n",
        ),
        (
            ["1.2.3.5:10001"].into_iter().collect(),
            failed(&["1.2.3.4:10000"]),
            "failed to connect to 1.2.3.4:10000 (something went wrong)\nActive connections: [1.2.3.5:10001]\n",
        ),
        (
            AddressSet::new(),
            failed(&["1.2.3.4:10000", "1.2.3.5:10001"]),
            "failed to connect to 1.2.3.4:10000 (something went wrong)\nfailed to connect to 1.2.3.5:10001 (something went wrong)\nActive connections: []\n",
        ),
    ];

    for (addrs, results, out) in cases {
        assert_eq!(sprint_conns(&addrs, &results), out, "bad output");
    }
}

#[test]
fn test_failed_targets_drop_out_of_active_set() {
    let addrs: AddressSet = ["d:1", "b:1", "a:1", "c:1"].into_iter().collect();
    let results: ResultMap<()> = ["b:1", "c:1"]
        .into_iter()
        .map(|a| ClientResult::failed(a, "refused"))
        .collect();

    let out = summarize(&addrs, &results);
    assert_eq!(
        out,
        "failed to connect to b:1 (refused)\nfailed to connect to c:1 (refused)\nActive connections: [d:1 a:1]\n"
    );
}

#[test]
fn test_failure_lines_precede_summary_line() {
    let addrs: AddressSet = ["a:1", "b:1", "c:1"].into_iter().collect();
    let cases: Vec<ResultMap<u32>> = vec![
        ResultMap::new(),
        [ClientResult::failed("b:1", "x")].into_iter().collect(),
        [
            ClientResult::failed("a:1", "x"),
            ClientResult::reply("b:1", 1),
            ClientResult::failed("z:1", "y"),
        ]
        .into_iter()
        .collect(),
    ];

    for results in cases {
        let out = sprint_conns(&addrs, &results);
        let errored = results.iter().filter(|(_, r)| r.is_err()).count();
        let lines: Vec<&str> = out.lines().collect();
        let summary_at = lines
            .iter()
            .position(|l| l.starts_with("Active connections: "))
            .unwrap();
        assert_eq!(summary_at, errored);
        assert!(
            lines[..summary_at]
                .iter()
                .all(|l| l.starts_with("failed to connect to "))
        );
    }
}

#[test]
fn test_summary_is_repeatable() {
    let results = failed(&["1.2.3.4:10000"]);
    let first = summarize(&addresses(), &results);
    let second = summarize(&addresses(), &results);
    assert_eq!(first, second);

    let summary = ConnectionSummary::new(&addresses(), &results);
    assert_eq!(summary.active().to_string(), "[1.2.3.5:10001]");
    assert!(summary.has_active());
}
