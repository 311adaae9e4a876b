use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use phylotree::tree::Tree;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

use crate::error::{Error, Result};

/// Strip bracketed Newick comments such as `[&&NHX:S=human]` or `[100]`.
///
/// Gene-family trees written with annotations carry these blocks after node
/// names and branch lengths; the names and lengths themselves are kept.
fn strip_newick_comments(newick: &str) -> String {
    let mut result = String::with_capacity(newick.len());
    let mut depth = 0usize;

    for ch in newick.chars() {
        match ch {
            '[' => depth += 1,
            ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => result.push(ch),
            _ => {}
        }
    }

    result
}

fn is_gzipped(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Read a whole text file, decompressing it when the name ends in `.gz`.
fn read_text(path: &Path) -> Result<String> {
    let io_err = |source| Error::Io { path: path.to_path_buf(), source };

    if is_gzipped(path) {
        let mut content = String::new();
        MultiGzDecoder::new(File::open(path).map_err(io_err)?)
            .read_to_string(&mut content)
            .map_err(io_err)?;
        Ok(content)
    } else {
        fs::read_to_string(path).map_err(io_err)
    }
}

/// Load one family tree from a Newick file (plain or gzip-compressed).
///
/// Only the first tree of the file is read; anything after its closing `;`
/// is ignored.
pub fn load_family_tree<P: AsRef<Path>>(path: P) -> Result<Tree> {
    let path = path.as_ref();
    let content = read_text(path)?;
    let newick = strip_newick_comments(&content);

    let newick = match newick.find(';') {
        Some(end) => newick[..=end].trim(),
        None => newick.trim(),
    };
    if newick.is_empty() {
        return Err(Error::Newick {
            path: path.to_path_buf(),
            message: "file contains no tree".to_string(),
        });
    }

    Tree::from_newick(newick).map_err(|e| Error::Newick {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Family name of a tree file: the base name without its extension.
///
/// A trailing `.gz` is dropped first, so `OG0001.nwk.gz` becomes `OG0001`.
pub fn family_name(path: &Path) -> String {
    let without_gz = if is_gzipped(path) { path.with_extension("") } else { path.to_path_buf() };
    without_gz
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Regular files of `dir`, sorted by file name.
pub fn list_tree_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let io_err = |source| Error::Io { path: dir.to_path_buf(), source };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Destination of the score table.
pub enum ScoreWriter {
    Stdout(io::StdoutLock<'static>),
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Write for ScoreWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(w) => w.write(buf),
            Self::Plain(w) => w.write(buf),
            Self::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::Plain(w) => w.flush(),
            Self::Gzip(w) => w.flush(),
        }
    }
}

impl ScoreWriter {
    /// Flush everything and, for gzip output, write the stream trailer.
    pub fn finish(self) -> Result<()> {
        match self {
            Self::Stdout(mut w) => w.flush(),
            Self::Plain(mut w) => w.flush(),
            Self::Gzip(enc) => enc.finish().and_then(|mut w| w.flush()),
        }
        .map_err(Error::Output)
    }
}

/// Open the destination of the score table.
///
/// `-` selects stdout. A path ending in `.gz` is gzip-compressed; call
/// [`ScoreWriter::finish`] to complete it.
pub fn open_score_writer<P: AsRef<Path>>(path: P) -> Result<ScoreWriter> {
    let p = path.as_ref();
    if p.as_os_str() == "-" {
        return Ok(ScoreWriter::Stdout(io::stdout().lock()));
    }

    let f = File::create(p).map_err(|source| Error::Io { path: p.to_path_buf(), source })?;
    let out = if is_gzipped(p) {
        ScoreWriter::Gzip(GzEncoder::new(BufWriter::new(f), Compression::default()))
    } else {
        ScoreWriter::Plain(BufWriter::new(f))
    };
    Ok(out)
}

/// Write one `<family> <precision>` line.
pub fn write_score_line<W: Write + ?Sized>(out: &mut W, family: &str, precision: f64) -> Result<()> {
    writeln!(out, "{family} {precision:?}").map_err(Error::Output)
}
