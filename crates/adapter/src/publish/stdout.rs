//! Stdout — dry-run publisher writing `topic<TAB>payload` lines.

use std::future::Future;
use std::pin::Pin;

use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

use super::{PublishError, Publisher, Record};

/// Publisher that writes each record as one line to an async writer.
///
/// The writer sits behind a mutex so concurrent publishes never interleave
/// within a line.
pub struct WriterPublisher<W> {
    writer: Mutex<W>,
}

pub type StdoutPublisher = WriterPublisher<Stdout>;

impl StdoutPublisher {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> WriterPublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    async fn write_record(&self, record: Record) -> Result<(), PublishError> {
        let mut line = Vec::with_capacity(record.topic.len() + record.payload.len() + 2);
        line.extend_from_slice(record.topic.as_bytes());
        line.push(b'\t');
        line.extend_from_slice(&record.payload);
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await?;
        writer.flush().await?;
        Ok(())
    }
}

impl<W> Publisher for WriterPublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    fn name(&self) -> &'static str {
        "stdout"
    }

    fn publish(
        &self,
        record: Record,
    ) -> Pin<Box<dyn Future<Output = Result<(), PublishError>> + Send + '_>> {
        Box::pin(self.write_record(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_writes_topic_tab_payload_line() {
        let publisher = WriterPublisher::new(Vec::<u8>::new());

        publisher
            .publish(Record::new("logs", Bytes::from_static(br#"{"message":"a"}"#)))
            .await
            .unwrap();
        publisher
            .publish(Record::new("logs", Bytes::from_static(br#"{"message":"b"}"#)))
            .await
            .unwrap();

        let out = String::from_utf8(publisher.into_inner()).unwrap();
        assert_eq!(out, "logs\t{\"message\":\"a\"}\nlogs\t{\"message\":\"b\"}\n");
    }

    #[tokio::test]
    async fn test_empty_topic_still_written() {
        let publisher = WriterPublisher::new(Vec::<u8>::new());
        publisher.publish(Record::new("", Bytes::from_static(b"{}"))).await.unwrap();

        assert_eq!(publisher.into_inner(), b"\t{}\n");
    }

    #[test]
    fn test_name() {
        assert_eq!(WriterPublisher::new(Vec::<u8>::new()).name(), "stdout");
    }
}
