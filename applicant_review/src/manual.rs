/*!

User manual for the `apprev` command-line tool.

# Input format

`apprev` reads a single JSON file holding an array of applicant records, as
exported by the summarization pipeline:

```json
[
  {
    "user_name": "홍길동",
    "user_sex": "남",
    "user_birth": "1999-03-02",
    "summarization": {
      "지원 동기": "사람들에게 도움이 되는 일을 하고 싶습니다.",
      "활동 계획": "주 1회 이상 꾸준히 참여하겠습니다."
    },
    "evaluation_result": {
      "지원 동기 및 진정성": { "score": "A" },
      "논리적 표현력": { "score": "B" },
      "활동경험": { "score": "NP" },
      "성실성(성의)": { "score": "P" }
    }
  }
]
```

`user_name`, `user_sex` and `user_birth` are required. `summarization` may be
empty and `evaluation_result` may be missing entirely for applicants that
have not been reviewed yet. An evaluation entry without a `"score"` key is
ignored.

# Commands

Print the score distribution report:

```text
apprev -i records.json --report
```

The output lists each evaluation category with its counts per letter in the
fixed A, B, C, G, P, NP order, then the overall distribution and the total
number of applicants:

```text
=== 평가 항목별 점수 분포 ===

지원 동기 및 진정성:
  A: 2명
  B: 3명
  ...

=== 전체 점수 분포 ===
A: 4개
...

총 지원자 수: 6명
```

Browse records with filters and ordering:

```text
apprev -i records.json --name 홍길 --sex 여 --sort-by birth --descending
```

The name filter is case-insensitive, the sex filter matches exactly, and
both must hold when given. `--sort-by` accepts `name` or `birth`.

Search by exact name fragment (case-sensitive) and analyze the most common
words of each matching record's summaries:

```text
apprev -i records.json --search 홍길동 --analyze
```

Show demographics (sex distribution and age groups) or the evaluation
criteria legend:

```text
apprev -i records.json --stats
apprev --categories
```

# Summaries

`apprev` can write a machine-readable summary of the tally and compare it
against a reference run:

```text
apprev -i records.json --out summary.json
apprev -i records.json --out stdout --reference summary.json
```

When a reference is given, the tool recomputes the summary and prints a
diff if the two disagree.

*/
