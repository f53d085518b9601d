/*!

# Quick start

This example walks through a screening round end to end with the `apprev`
command line tool. The starting point is the JSON export produced by the
summarization pipeline, here called `records.json`. The expected shape of
that file is described in the [manual](crate::manual).

**Checking the tally** The first thing to do with a fresh export is to print
the score distribution:

```bash
apprev -i records.json --report
```

This prints each evaluation category with its counts over the six score
letters, the overall distribution and the total number of applicants:

```text
=== 평가 항목별 점수 분포 ===

지원 동기 및 진정성:
  A: 2명
  B: 3명
  C: 1명
  G: 0명
  P: 0명
  NP: 0명
...

=== 전체 점수 분포 ===
A: 4개
B: 7개
...

총 지원자 수: 6명
```

Add `--verbose` to see which records were skipped (not evaluated yet) and
which evaluation entries were ignored (no score, unknown category).

**Browsing** The record list can be filtered and ordered. The name filter is
case-insensitive, the sex filter is an exact match:

```bash
apprev -i records.json --name 홍길 --sex 여 --sort-by birth
```

To look up specific applicants by exact name fragment and see what they
wrote about most, use the search path with the word analysis:

```bash
apprev -i records.json --search 홍길동 --analyze
```

**Keeping a reference** Once the tally looks right, write the summary to a
file:

```bash
apprev -i records.json --out summary.json
```

Later runs over the same export can be checked against it. A mismatch prints
a line diff and exits with an error:

```bash
apprev -i records.json --out stdout --reference summary.json
```

**Using the library** The same computations are available without the
command line tool through this crate. The binary only adds JSON loading and
printing on top of it:

```rust
use applicant_review::*;
use applicant_review::builder::RecordBuilder;

let records = vec![
    RecordBuilder::new("홍길동", "남", "1999-03-02")
        .score("지원 동기 및 진정성", "A")
        .build(),
];
let tally = tally_scores(&records, &default_categories());
assert_eq!(tally.overall_count("A"), 1);
```

*/
