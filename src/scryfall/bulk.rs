use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use crate::error::SyncError;
use crate::scryfall::records::CardRecord;
use crate::scryfall::ScryfallClient;

/// Where a bulk card snapshot comes from.
#[derive(Debug, Clone)]
pub enum BulkSource {
    /// A named snapshot downloaded from the bulk-data endpoint,
    /// e.g. `default_cards`.
    Api(String),
    /// A snapshot already on local disk.
    File(PathBuf),
}

impl BulkSource {
    /// Opens the snapshot for reading. The API variant downloads the
    /// snapshot into an unnamed temporary file first so decoding does
    /// not hold the connection open.
    pub async fn open(&self, client: &ScryfallClient) -> Result<BufReader<std::fs::File>, SyncError> {
        match self {
            Self::File(path) => Ok(BufReader::new(std::fs::File::open(path)?)),
            Self::Api(name) => {
                let meta = client.bulk_data(name).await?;
                log::info!("Downloading bulk snapshot {name} from {}", meta.download_uri);
                let mut response = client
                    .http()
                    .get(&meta.download_uri)
                    .send()
                    .await
                    .map_err(crate::scryfall::fetcher::FetchError::from)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(crate::scryfall::fetcher::FetchError::Status {
                        url: meta.download_uri,
                        status,
                    }
                    .into());
                }
                let mut spool = tempfile::tempfile()?;
                while let Some(chunk) = response
                    .chunk()
                    .await
                    .map_err(crate::scryfall::fetcher::FetchError::from)?
                {
                    spool.write_all(&chunk)?;
                }
                spool.seek(SeekFrom::Start(0))?;
                Ok(BufReader::new(spool))
            }
        }
    }
}

/// Streaming decoder over a bulk card snapshot. Accepts both the
/// array-delimited form the bulk endpoint serves and bare
/// whitespace-separated objects, yielding one record at a time so the
/// whole snapshot never sits in memory.
pub struct BulkRecords<R: Read> {
    bytes: io::Bytes<BufReader<R>>,
    array_mode: bool,
    started: bool,
    done: bool,
}

impl<R: Read> BulkRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            array_mode: false,
            started: false,
            done: false,
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, io::Error> {
        self.bytes.next().transpose()
    }

    /// Skips whitespace and element separators, returning the first
    /// significant byte.
    fn next_significant(&mut self) -> Result<Option<u8>, io::Error> {
        while let Some(byte) = self.next_byte()? {
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' | b',' => {}
                other => return Ok(Some(other)),
            }
        }
        Ok(None)
    }

    fn read_record(&mut self) -> Result<Option<CardRecord>, SyncError> {
        let Some(mut first) = self.next_significant()? else {
            self.done = true;
            return Ok(None);
        };
        if !self.started {
            self.started = true;
            if first == b'[' {
                self.array_mode = true;
                match self.next_significant()? {
                    Some(byte) => first = byte,
                    None => {
                        self.done = true;
                        return Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "snapshot ended inside the top-level array",
                        )
                        .into());
                    }
                }
            }
        }
        if self.array_mode && first == b']' {
            self.done = true;
            return Ok(None);
        }
        if first != b'{' {
            self.done = true;
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected an object, found byte {first:#04x}"),
            )
            .into());
        }

        let mut raw = vec![first];
        let mut depth = 1u32;
        let mut in_string = false;
        let mut escaped = false;
        while depth > 0 {
            let Some(byte) = self.next_byte()? else {
                self.done = true;
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "snapshot ended inside a record",
                )
                .into());
            };
            raw.push(byte);
            if in_string {
                if escaped {
                    escaped = false;
                } else if byte == b'\\' {
                    escaped = true;
                } else if byte == b'"' {
                    in_string = false;
                }
            } else {
                match byte {
                    b'"' => in_string = true,
                    b'{' | b'[' => depth += 1,
                    b'}' | b']' => depth -= 1,
                    _ => {}
                }
            }
        }
        Ok(Some(serde_json::from_slice(&raw)?))
    }
}

impl<R: Read> Iterator for BulkRecords<R> {
    type Item = Result<CardRecord, SyncError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.read_record().transpose()
    }
}
