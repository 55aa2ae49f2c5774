/*!

This is the long-form manual for `precinct_results` and `precinctcsv`.

## Input formats

The PDF reports are not read directly. The tables must first be extracted by a PDF table
extraction tool, and `precinctcsv` reads its output. The following formats are supported:
* `pdfplumber` (default) JSON dump of the tables found by pdfplumber
* `tabula` JSON output of Tabula
* `xlsx` Excel workbook, one table per worksheet

### `pdfplumber`

A JSON file with the tables of each page:

```json
{
  "settings": {
    "text_line_dir_rotated": "rtl",
    "text_char_dir_rotated": "ttb",
    "text_keep_blank_chars": true
  },
  "pages": [
    {"page_number": 1, "tables": [[[null, "Mayor", null], [null, "VOTE FOR 1", null]]]}
  ]
}
```

The tables must be extracted with the text settings above: the header cells of the reports are
rotated, and other settings split them differently. The `settings` entry is optional. When it is
present and does not match, a warning is printed.

Such a file can be produced with a few lines of Python:

```python
with pdfplumber.open(path) as pdf:
    settings = dict(text_line_dir_rotated="rtl", text_char_dir_rotated="ttb", text_keep_blank_chars=True)
    pages = [dict(page_number=p.page_number, tables=p.extract_tables(settings)) for p in pdf.pages]
    json.dump(dict(settings=settings, pages=pages), out)
```

### `tabula`

The JSON output of `tabula -f JSON -p all`. Tabula does not distinguish empty cells from merged
cells: all the empty cells are treated as blank.

### `xlsx`

Each worksheet is read as one table of its own page. Excel drops empty columns at the edges of a sheet:
the cells keep their column letter (a table starting at column B gets a blank first column), and a
blank last column is added back to every row. Use `excelWorksheetName` (or
`--excel-worksheet-name`) to read a single worksheet.

## Party codes

Candidate names may start with a party code (`DEM Jane Smith`). The codes are read from a CSV file
with two columns:

```text
Party code,Party description
DEM,Democratic Party
REP,Republican Party
```

Names that start with an unknown code are kept as they are, without party.

## Output

A CSV file with the columns `Race,Precinct,PrecinctCode,Name,Party,Votes`, one row per candidate
and per precinct. Blank tally cells have an empty `Votes` field: this is different from `0`.
Nothing is written if any table fails to be extracted.

## Configuration

The options may be passed on the command line or with a JSON configuration file (`--config`):

```json
{
  "outputSettings": {"outputFile": "2024_precincts.csv"},
  "tableSources": [{"provider": "pdfplumber", "filePath": "2024_tables.json"}],
  "partiesFile": "Parties.csv",
  "errorPolicy": "abort"
}
```

Relative paths are relative to the directory of the configuration file.

- `tableSources` (array, required): the tables to read. The records of all the sources are
  written in order to the same output.
- `provider` (string, optional): one of the input formats above. Default `pdfplumber`.
- `excelWorksheetName` (string, optional): for `xlsx`, the only worksheet to read.
- `partiesFile` (string, optional): the party codes. Without it, no candidate has a party.
- `errorPolicy` (string, optional): `abort` stops at the first table that cannot be extracted,
  `collect` attempts all the tables and reports all the failures. Default `abort`.
- `outputFile` (string, optional): the output path, or `stdout`. Default `stdout`.

*/
