//! Module containing functions for loading activity CSV files into an event table.
//!
//! # Example
//! ```no_run
//! use regex::Regex;
//! use subflow::graph_loader::source::csv_loader::CsvLoader;
//!
//! let table = CsvLoader::new("data/")
//!     .set_header(true)
//!     .set_delimiter(",")
//!     .with_filter(Regex::new(r".+\.csv(\.gz)?$").unwrap())
//!     .load_events()
//!     .expect("Csv did not parse.");
//!
//! println!("loaded {} posts", table.len());
//! ```

use crate::{
    core::{
        EpochTime, Event, EventTable, ParseTimeError, AUTHOR_COL, CREATED_UTC_COL,
        SUBREDDIT_COL,
    },
    errors::{FormatError, GraphError},
};
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use regex::Regex;
use std::{
    collections::VecDeque,
    fs,
    fs::File,
    io,
    io::BufReader,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// A struct that defines the CSV loader with configurable options.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    /// Path of the CSV file or directory containing CSV files.
    path: PathBuf,
    /// Optional regex filter to select specific CSV files by name.
    regex_filter: Option<Regex>,
    /// Specifies whether the CSV file has a header.
    header: bool,
    /// The delimiter character used in the CSV file.
    delimiter: u8,
}

/// Positions of the required columns within a record.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    author: usize,
    subreddit: usize,
    created_utc: usize,
}

impl ColumnIndex {
    fn locate(path: &Path, columns: &[String]) -> Result<Self, FormatError> {
        let find = |name: &str| columns.iter().position(|column| column == name);
        match (find(AUTHOR_COL), find(SUBREDDIT_COL), find(CREATED_UTC_COL)) {
            (Some(author), Some(subreddit), Some(created_utc)) => Ok(Self {
                author,
                subreddit,
                created_utc,
            }),
            (author, subreddit, created_utc) => {
                let missing = [
                    (author, AUTHOR_COL),
                    (subreddit, SUBREDDIT_COL),
                    (created_utc, CREATED_UTC_COL),
                ]
                .into_iter()
                .filter(|(found, _)| found.is_none())
                .map(|(_, name)| name.to_string())
                .collect();
                Err(FormatError::MissingColumns {
                    path: path.to_path_buf(),
                    missing,
                })
            }
        }
    }
}

/// Column names used for files without a header row: the required columns first,
/// then positional names for anything after them.
fn positional_columns(width: usize) -> Vec<String> {
    [AUTHOR_COL, SUBREDDIT_COL, CREATED_UTC_COL]
        .iter()
        .map(|name| name.to_string())
        .chain((3..width).map(|i| format!("column_{i}")))
        .take(width)
        .collect()
}

impl CsvLoader {
    /// Creates a new `CsvLoader` instance with the specified file path.
    ///
    /// The loader expects a header row and `,` as delimiter unless told otherwise.
    ///
    /// # Arguments
    ///
    /// * `p` - A path of the CSV file or directory containing CSV files.
    pub fn new<P: Into<PathBuf>>(p: P) -> Self {
        Self {
            path: p.into(),
            regex_filter: None,
            header: true,
            delimiter: b',',
        }
    }

    /// Sets whether the CSV file has a header.
    pub fn set_header(mut self, h: bool) -> Self {
        self.header = h;
        self
    }

    /// Sets the delimiter character used in the CSV file. Only the first byte of `d`
    /// is used; an empty string leaves the delimiter unchanged.
    pub fn set_delimiter(mut self, d: &str) -> Self {
        if let Some(delimiter) = d.as_bytes().first() {
            self.delimiter = *delimiter;
        }
        self
    }

    /// Sets the regex filter to select specific CSV files by name.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use regex::Regex;
    /// use subflow::graph_loader::source::csv_loader::CsvLoader;
    ///
    /// let loader = CsvLoader::new("/path/to/csv_files")
    ///    .with_filter(Regex::new(r"combined_raw").unwrap());
    /// ```
    pub fn with_filter(mut self, r: Regex) -> Self {
        self.regex_filter = Some(r);
        self
    }

    fn is_dir<P: AsRef<Path>>(p: &P) -> Result<bool, GraphError> {
        Ok(fs::metadata(p)?.is_dir())
    }

    /// Pushes `path` into `paths` if it matches the filter (or there is no filter).
    fn accept_file<P: Into<PathBuf>>(&self, path: P, paths: &mut Vec<PathBuf>) {
        let p: PathBuf = path.into();
        if let Some(pattern) = &self.regex_filter {
            let is_match = p
                .to_str()
                .filter(|file_name| pattern.is_match(file_name))
                .is_some();
            if is_match {
                paths.push(p);
            }
        } else {
            paths.push(p)
        }
    }

    /// Collects the files to load. Directories are traversed recursively; the result is
    /// sorted so repeated runs read files in the same order.
    fn files_vec(&self) -> Result<Vec<PathBuf>, GraphError> {
        let mut paths = vec![];
        let mut queue = VecDeque::from([self.path.to_path_buf()]);

        while let Some(ref path) = queue.pop_back() {
            if Self::is_dir(path)? {
                for entry in fs::read_dir(path)? {
                    let p = entry?.path();
                    if Self::is_dir(&p)? {
                        queue.push_back(p)
                    } else {
                        self.accept_file(p, &mut paths);
                    }
                }
            } else {
                self.accept_file(path.to_path_buf(), &mut paths);
            }
        }

        paths.sort();
        Ok(paths)
    }

    /// Loads every matching file into one [`EventTable`], in sorted path order.
    ///
    /// Rows with an empty subreddit are skipped and counted in a warning. Rows with an
    /// empty author are kept: they still count as posts, but belong to no user.
    ///
    /// # Errors
    ///
    /// - [`FormatError::MissingColumns`] if a file lacks `author`, `subreddit` or `created_utc`.
    /// - [`FormatError::HeaderMismatch`] if files in a directory disagree on columns.
    /// - [`FormatError::InvalidTimestamp`] / [`FormatError::TimestampOutOfRange`] for
    ///   unusable `created_utc` values.
    /// - [`GraphError::NoInputFiles`] if nothing matched.
    pub fn load_events(&self) -> Result<EventTable, GraphError> {
        let paths = self.files_vec()?;
        if paths.is_empty() {
            return Err(GraphError::NoInputFiles(self.path.clone()));
        }

        let mut table: Option<EventTable> = None;
        let mut skipped = 0usize;
        for path in &paths {
            skipped += self.load_file(path, &mut table)?;
        }
        let table = table.unwrap_or_default();

        if skipped > 0 {
            warn!(skipped, "skipped rows with an empty subreddit");
        }
        info!(
            files = paths.len(),
            rows = table.len(),
            "loaded activity events"
        );
        Ok(table)
    }

    /// Appends the rows of one file to `table`, creating it from the first file's
    /// columns. Returns the number of skipped rows.
    fn load_file(&self, path: &Path, table: &mut Option<EventTable>) -> Result<usize, GraphError> {
        debug!(path = %path.display(), "reading activity file");
        let mut csv_reader = self.csv_reader(path)?;

        let mut first_record = None;
        let columns = if self.header {
            csv_reader
                .headers()?
                .iter()
                .map(|column| column.trim().to_string())
                .collect::<Vec<_>>()
        } else {
            match csv_reader.records().next() {
                None => return Ok(0),
                Some(record) => {
                    let record = record?;
                    let columns = positional_columns(record.len());
                    first_record = Some(record);
                    columns
                }
            }
        };

        match table.as_ref() {
            Some(existing) if existing.columns() != columns.as_slice() => {
                return Err(FormatError::HeaderMismatch {
                    path: path.to_path_buf(),
                }
                .into());
            }
            Some(_) => {}
            None => {
                ColumnIndex::locate(path, &columns)?;
            }
        }
        let table = table.get_or_insert_with(|| EventTable::new(columns));
        let index = ColumnIndex::locate(path, table.columns())?;

        let mut skipped = 0;
        let records = first_record
            .into_iter()
            .map(Ok::<_, csv::Error>)
            .chain(csv_reader.records());
        for rec in records {
            let record = rec?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let field = |i: usize| record.get(i).unwrap_or_default();

            let author = field(index.author).trim();
            let subreddit = field(index.subreddit).trim();
            if subreddit.is_empty() {
                skipped += 1;
                continue;
            }

            let raw_time = field(index.created_utc);
            let time = EpochTime::parse(raw_time).map_err(|err| match err {
                ParseTimeError::NotNumeric(_) => FormatError::InvalidTimestamp {
                    path: path.to_path_buf(),
                    line,
                    value: raw_time.to_string(),
                },
                ParseTimeError::OutOfRange(_) => FormatError::TimestampOutOfRange {
                    path: path.to_path_buf(),
                    line,
                    value: raw_time.to_string(),
                },
            })?;

            table.push(Event::with_fields(
                author.to_string(),
                subreddit.to_string(),
                time,
                record.iter().map(|f| f.to_string()).collect(),
            ));
        }
        Ok(skipped)
    }

    /// Returns a `csv::Reader` for the specified file path, automatically detecting and
    /// handling gzip and bzip compression.
    fn csv_reader(&self, file_path: &Path) -> Result<csv::Reader<Box<dyn io::Read>>, GraphError> {
        let file_name = file_path.file_name().and_then(|name| name.to_str());
        let is_gziped = file_name.filter(|name| name.ends_with(".gz")).is_some();
        let is_bziped = file_name.filter(|name| name.ends_with(".bz2")).is_some();

        let f = File::open(file_path)?;
        let inner: Box<dyn io::Read> = if is_gziped {
            Box::new(BufReader::new(GzDecoder::new(f)))
        } else if is_bziped {
            Box::new(BufReader::new(BzDecoder::new(f)))
        } else {
            Box::new(f)
        };
        Ok(csv::ReaderBuilder::new()
            .has_headers(self.header)
            .delimiter(self.delimiter)
            .from_reader(inner))
    }
}

#[cfg(test)]
mod csv_loader_test {
    use crate::{
        errors::{FormatError, GraphError},
        graph_loader::source::csv_loader::CsvLoader,
    };
    use flate2::{write::GzEncoder, Compression};
    use regex::Regex;
    use std::{fs, io::Write, path::Path};

    const POSTS: &str = "id,title,author,created_utc,subreddit\n\
        p1,hello,alice,1700000000,MachineLearning\n\
        p2,again,alice,1700000100.5,learnmachinelearning\n\
        p3,\"with, comma\",bob,1600000000,MachineLearning\n";

    fn write(path: &Path, contents: &str) {
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn regex_match() {
        let r = Regex::new(r".+raw").unwrap();
        assert!(r.is_match("data/combined_raw.csv"));
        assert!(!r.is_match("data/results.csv"));
    }

    #[test]
    fn loads_columns_and_keeps_raw_fields() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("posts.csv");
        write(&file, POSTS);

        let table = CsvLoader::new(&file).load_events().unwrap();
        assert_eq!(
            table.columns(),
            &["id", "title", "author", "created_utc", "subreddit"]
        );
        assert_eq!(table.len(), 3);
        let third = &table.events()[2];
        assert_eq!(third.author, "bob");
        assert_eq!(third.subreddit, "MachineLearning");
        assert_eq!(third.year(), 2020);
        assert_eq!(third.fields()[1], "with, comma");
        assert_eq!(table.events()[1].fields()[3], "1700000100.5");
    }

    #[test]
    fn missing_columns_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("posts.csv");
        write(&file, "author,title\nalice,hi\n");

        match CsvLoader::new(&file).load_events() {
            Err(GraphError::Format(FormatError::MissingColumns { missing, .. })) => {
                assert_eq!(missing, vec!["subreddit", "created_utc"]);
            }
            other => panic!("expected missing columns, got {other:?}"),
        }
    }

    #[test]
    fn bad_timestamp_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("posts.csv");
        write(
            &file,
            "author,subreddit,created_utc\nalice,A,100\nbob,B,2023-01-01\n",
        );

        match CsvLoader::new(&file).load_events() {
            Err(GraphError::Format(FormatError::InvalidTimestamp { line, value, .. })) => {
                assert_eq!(line, 3);
                assert_eq!(value, "2023-01-01");
            }
            other => panic!("expected invalid timestamp, got {other:?}"),
        }
    }

    #[test]
    fn rows_without_subreddit_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("posts.csv");
        write(
            &file,
            "author,subreddit,created_utc\n,A,100\nalice,,200\nalice,A,300\n",
        );
        let table = CsvLoader::new(&file).load_events().unwrap();
        let rows: Vec<_> = table
            .iter()
            .map(|e| (e.author.as_str(), e.subreddit.as_str()))
            .collect();
        assert_eq!(rows, vec![("", "A"), ("alice", "A")]);
    }

    #[test]
    fn directory_with_filter_and_gzip() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("a_raw.csv"),
            "author,subreddit,created_utc\nalice,A,100\n",
        );
        write(&dir.path().join("notes.txt"), "not a csv at all");
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        let mut encoder = GzEncoder::new(
            fs::File::create(nested.join("b_raw.csv.gz")).unwrap(),
            Compression::default(),
        );
        encoder
            .write_all(b"author,subreddit,created_utc\nbob,B,200\n")
            .unwrap();
        encoder.finish().unwrap();

        let table = CsvLoader::new(dir.path())
            .with_filter(Regex::new(r"_raw\.csv").unwrap())
            .load_events()
            .unwrap();
        let authors: Vec<_> = table.iter().map(|e| e.author.as_str()).collect();
        assert_eq!(authors, vec!["alice", "bob"]);
    }

    #[test]
    fn header_mismatch_between_files() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("1.csv"),
            "author,subreddit,created_utc\nalice,A,100\n",
        );
        write(
            &dir.path().join("2.csv"),
            "subreddit,author,created_utc\nB,bob,200\n",
        );
        assert!(matches!(
            CsvLoader::new(dir.path()).load_events(),
            Err(GraphError::Format(FormatError::HeaderMismatch { .. }))
        ));
    }

    #[test]
    fn headerless_files_with_custom_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("posts.tsv");
        write(&file, "alice\tA\t100\textra\nbob\tB\t200\textra\n");

        let table = CsvLoader::new(&file)
            .set_header(false)
            .set_delimiter("\t")
            .load_events()
            .unwrap();
        assert_eq!(
            table.columns(),
            &["author", "subreddit", "created_utc", "column_3"]
        );
        assert_eq!(table.events()[1].subreddit, "B");
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            CsvLoader::new(dir.path()).load_events(),
            Err(GraphError::NoInputFiles(_))
        ));
    }
}
