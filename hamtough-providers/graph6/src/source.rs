//! Line-oriented graph6 reader.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use hamtough_core::Graph;
use tracing::{debug, instrument};

use crate::errors::Graph6SourceError;

/// Iterator over the graphs of a graph6 stream.
///
/// Blank lines are skipped. The first graph fixes the order of the stream;
/// a later graph of another order yields [`Graph6SourceError::MixedOrder`].
/// A stream without any graph yields a single
/// [`Graph6SourceError::EmptyInput`]. Each graph is labelled with its line.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use hamtough_providers_graph6::Graph6Source;
///
/// let source = Graph6Source::from_reader("demo", Cursor::new("Bw\n\nBg\n"));
/// let names: Vec<String> = source
///     .map(|graph| graph.map(|g| g.name().into_owned()))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(names, ["Bw", "Bg"]);
/// # Ok::<(), hamtough_providers_graph6::Graph6SourceError>(())
/// ```
#[derive(Debug)]
pub struct Graph6Source<R> {
    name: String,
    lines: io::Lines<R>,
    line: usize,
    order: Option<usize>,
    yielded: bool,
    finished: bool,
}

impl Graph6Source<BufReader<File>> {
    /// Opens `path` for streaming. The stream is named after the path.
    ///
    /// # Errors
    /// Returns [`Graph6SourceError::Open`] when the file cannot be opened.
    #[instrument(
        name = "graph6_source.open",
        err,
        skip(path),
        fields(path = %path.as_ref().display()),
    )]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Graph6SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Graph6SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("opened graph6 source");
        Ok(Self::from_reader(path.display().to_string(), BufReader::new(file)))
    }
}

impl<R: BufRead> Graph6Source<R> {
    /// Streams graphs from `reader`, naming the stream `name` in errors.
    #[must_use]
    pub fn from_reader(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            lines: reader.lines(),
            line: 0,
            order: None,
            yielded: false,
            finished: false,
        }
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Order fixed by the first graph, once one has been read.
    #[must_use]
    pub fn order(&self) -> Option<usize> {
        self.order
    }

    fn check_order(&mut self, graph: &Graph) -> Result<(), Graph6SourceError> {
        match self.order {
            None => {
                self.order = Some(graph.order());
                Ok(())
            }
            Some(expected) if expected != graph.order() => Err(Graph6SourceError::MixedOrder {
                name: self.name.clone(),
                line: self.line,
                expected,
                found: graph.order(),
            }),
            Some(_) => Ok(()),
        }
    }
}

impl<R: BufRead> Iterator for Graph6Source<R> {
    type Item = Result<Graph, Graph6SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let Some(read) = self.lines.next() else {
                self.finished = true;
                return (!self.yielded).then(|| {
                    Err(Graph6SourceError::EmptyInput {
                        name: self.name.clone(),
                    })
                });
            };
            self.line += 1;
            let text = match read {
                Ok(text) => text,
                Err(source) => {
                    self.finished = true;
                    return Some(Err(Graph6SourceError::Read {
                        name: self.name.clone(),
                        line: self.line,
                        source,
                    }));
                }
            };
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.yielded = true;
            let graph = match Graph::from_graph6(trimmed) {
                Ok(graph) => graph,
                Err(source) => {
                    return Some(Err(Graph6SourceError::Decode {
                        name: self.name.clone(),
                        line: self.line,
                        source,
                    }));
                }
            };
            return Some(self.check_order(&graph).map(|()| graph));
        }
    }
}
