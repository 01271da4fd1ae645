//! The peer side of the tracker protocol.
//!
//! Every exchange with a reply is synchronous: the client sends the request
//! and waits for the reply before returning. A peer never has more than one
//! request in flight.
use std::panic::Location;

use swarm_sim_primitives::{FileDescriptor, PeerId, SeedList};
use swarm_sim_protocol::{FileInfo, RequestKind, TrackerRequest, TrackerSender};
use tokio::sync::oneshot;

#[derive(thiserror::Error, Debug, Clone)]
pub enum TrackerClientError {
    /// The tracker inbox is closed or the tracker dropped the reply.
    #[error("The tracker is gone, the {kind} request of peer {peer} was not delivered, {location}")]
    Disconnected {
        peer: PeerId,
        kind: RequestKind,
        location: &'static Location<'static>,
    },
}

#[derive(Debug, Clone)]
pub struct TrackerClient {
    peer: PeerId,
    sender: TrackerSender,
}

impl TrackerClient {
    #[must_use]
    pub fn new(peer: PeerId, sender: TrackerSender) -> Self {
        Self { peer, sender }
    }

    /// Reports the files the peer owns and waits for the acknowledgement.
    ///
    /// # Errors
    ///
    /// Will return an error if the tracker is gone.
    pub async fn report_owned_files(&self, files: Vec<FileDescriptor>) -> Result<(), TrackerClientError> {
        let (ack, ack_rx) = oneshot::channel();

        self.send(TrackerRequest::InitReport {
            peer: self.peer,
            files,
            ack,
        })
        .await?;

        ack_rx.await.map_err(|_| self.disconnected(RequestKind::InitReport))?;

        Ok(())
    }

    /// Asks for the segments and the seeds of a file.
    ///
    /// # Errors
    ///
    /// Will return an error if the tracker is gone.
    pub async fn want_file(&self, filename: &str) -> Result<FileInfo, TrackerClientError> {
        let (reply, reply_rx) = oneshot::channel();

        self.send(TrackerRequest::WantFile {
            peer: self.peer,
            filename: filename.to_owned(),
            reply,
        })
        .await?;

        reply_rx.await.map_err(|_| self.disconnected(RequestKind::WantFile))
    }

    /// Asks for the current seeds of a file.
    ///
    /// # Errors
    ///
    /// Will return an error if the tracker is gone.
    pub async fn refresh_swarm(&self, filename: &str) -> Result<SeedList, TrackerClientError> {
        let (reply, reply_rx) = oneshot::channel();

        self.send(TrackerRequest::SwarmRefresh {
            peer: self.peer,
            filename: filename.to_owned(),
            reply,
        })
        .await?;

        reply_rx.await.map_err(|_| self.disconnected(RequestKind::SwarmRefresh))
    }

    /// Tells the tracker the peer can serve the whole file.
    ///
    /// # Errors
    ///
    /// Will return an error if the tracker is gone.
    pub async fn file_complete(&self, filename: &str) -> Result<(), TrackerClientError> {
        self.send(TrackerRequest::FileComplete {
            peer: self.peer,
            filename: filename.to_owned(),
        })
        .await
    }

    /// Tells the tracker the peer has processed all its wanted files.
    ///
    /// # Errors
    ///
    /// Will return an error if the tracker is gone.
    pub async fn all_done(&self) -> Result<(), TrackerClientError> {
        self.send(TrackerRequest::AllDone { peer: self.peer }).await
    }

    async fn send(&self, request: TrackerRequest) -> Result<(), TrackerClientError> {
        let kind = request.kind();

        tracing::debug!(peer = %self.peer, %kind, "sending request to the tracker");

        self.sender.send(request).await.map_err(|_| self.disconnected(kind))
    }

    #[track_caller]
    fn disconnected(&self, kind: RequestKind) -> TrackerClientError {
        TrackerClientError::Disconnected {
            peer: self.peer,
            kind,
            location: Location::caller(),
        }
    }
}

#[cfg(test)]
mod tests {

    mod the_tracker_client {
        use swarm_sim_primitives::SeedList;
        use swarm_sim_protocol::{FileInfo, InitAck, TrackerRequest};
        use swarm_sim_test_helpers::sample;
        use tokio::sync::mpsc;

        use crate::tracker_client::TrackerClient;

        #[tokio::test]
        async fn it_should_wait_for_the_acknowledgement_of_the_owned_files_report() {
            let (sender, mut inbox) = mpsc::channel(1);
            let client = TrackerClient::new(sample::peer(1), sender);

            let tracker = tokio::spawn(async move {
                match inbox.recv().await.unwrap() {
                    TrackerRequest::InitReport { peer, files, ack } => {
                        ack.send(InitAck).unwrap();
                        (peer, files)
                    }
                    other => panic!("unexpected request: {other:?}"),
                }
            });

            client.report_owned_files(vec![sample::file("file1", 1)]).await.unwrap();

            let (peer, files) = tracker.await.unwrap();
            assert_eq!(peer, sample::peer(1));
            assert_eq!(files, vec![sample::file("file1", 1)]);
        }

        #[tokio::test]
        async fn it_should_return_the_file_info_sent_by_the_tracker() {
            let (sender, mut inbox) = mpsc::channel(1);
            let client = TrackerClient::new(sample::peer(1), sender);

            tokio::spawn(async move {
                if let Some(TrackerRequest::WantFile { reply, .. }) = inbox.recv().await {
                    reply.send(FileInfo::Unknown).unwrap();
                }
            });

            assert_eq!(client.want_file("ghost").await.unwrap(), FileInfo::Unknown);
        }

        #[tokio::test]
        async fn it_should_return_the_seeds_sent_by_the_tracker() {
            let (sender, mut inbox) = mpsc::channel(1);
            let client = TrackerClient::new(sample::peer(1), sender);

            tokio::spawn(async move {
                if let Some(TrackerRequest::SwarmRefresh { reply, .. }) = inbox.recv().await {
                    reply.send(SeedList::from(vec![sample::peer(2)])).unwrap();
                }
            });

            assert_eq!(
                client.refresh_swarm("file1").await.unwrap(),
                SeedList::from(vec![sample::peer(2)])
            );
        }

        #[tokio::test]
        async fn it_should_fail_when_the_tracker_inbox_is_closed() {
            let (sender, inbox) = mpsc::channel(1);
            drop(inbox);
            let client = TrackerClient::new(sample::peer(1), sender);

            let err = client.all_done().await.unwrap_err();

            assert!(err.to_string().contains("the all_done request of peer 1 was not delivered"), "{err}");
        }

        #[tokio::test]
        async fn it_should_fail_when_the_tracker_drops_the_reply() {
            let (sender, mut inbox) = mpsc::channel(1);
            let client = TrackerClient::new(sample::peer(1), sender);

            tokio::spawn(async move {
                drop(inbox.recv().await);
            });

            let err = client.want_file("file1").await.unwrap_err();

            assert!(err.to_string().contains("the want_file request of peer 1"), "{err}");
        }
    }
}
