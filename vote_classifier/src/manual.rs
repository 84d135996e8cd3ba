/*!

This is the long-form manual for `vote_classifier` and `votetally`.

## Input formats

The following formats are supported:
* `xlsx` Excel workbooks. Only the first worksheet is read.
* `csv` Comma Separated Values (command line only).

In both cases the first row is the header. The other rows are the comments.

## Finding the vote column

The header names are trimmed and lower-cased, then the first column whose name
contains one of the following words is used:

| priority | token        |
|----------|--------------|
| 1        | `voto`       |
| 2        | `elección`   |
| 3        | `elecciones` |
| 4        | `votación`   |
| 5        | `opción`     |

Columns are examined from left to right, so `Elecciones 2025 | Voto` picks the
first column even though `voto` has a higher priority.

If no column matches, the tabulation stops and reports the list of columns
that were found. Renaming the column that holds the votes to `Voto` fixes it.

## Labels

Each comment gets exactly one label. The tests are case-sensitive and are
evaluated in order:

1. contains `Noboa`: `Voto Noboa`
2. contains `Luisa`: `Voto Luisa`
3. anything else, including empty cells: `Voto Nulo`

## The `report` command

The report reads the column named exactly `text`, shows a reproducible sample
of the comments, the counts as a bar chart, the share of null votes and the
most frequent words. A share of null votes above 20% is flagged as high.

With `--chatbot`, all the comments are sent as one text to the configured chat
service and its answer is printed.

## Configuration

`votetally --config settings.json` accepts the following keys, all optional:

```json
{
  "bind": "127.0.0.1:5000",
  "maxUploadBytes": 16777216,
  "chatbotUrl": "http://127.0.0.1:5000/procesar",
  "chatbotTimeoutSeconds": 30,
  "sampleSize": 10,
  "sampleSeed": 42,
  "topWords": 20
}
```

*/
