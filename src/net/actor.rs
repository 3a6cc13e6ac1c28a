//! Dispatch actor - runs HTTP requests, make targets and the background
//! reference poller in the Tokio runtime. Every unit of work is a spawned
//! task resolving to exactly one `TaskEvent`; tasks never touch application
//! state.

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::messages::{TaskCommand, TaskEvent};
use crate::net::client::{
    create_client, execute_request, fetch_reference_lists, fetch_stats,
};
use crate::net::shell::run_make_target;

pub struct DispatchActor {
    client: reqwest::Client,
    config: Config,
    event_tx: mpsc::UnboundedSender<TaskEvent>,
    tasks: JoinSet<()>,
}

impl DispatchActor {
    pub fn new(config: Config, event_tx: mpsc::UnboundedSender<TaskEvent>) -> Self {
        DispatchActor {
            client: create_client(),
            config,
            event_tx,
            tasks: JoinSet::new(),
        }
    }

    /// Run the dispatch message loop. The poll interval's first tick fires
    /// immediately, giving the reference cache its startup fetch; it then
    /// re-fires for the life of the process.
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<TaskCommand>) {
        let mut poll = tokio::time::interval(self.config.poll_interval);
        poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(TaskCommand::ExecuteRequest { id, prepared }) => {
                            let event_tx = self.event_tx.clone();
                            let client = self.client.clone();

                            self.tasks.spawn(async move {
                                tracing::info!(id, url = %prepared.url, method = prepared.method.as_str(), "Executing request");
                                let event = execute_request(&client, prepared).await;
                                tracing::info!(id, "Request completed");
                                let _ = event_tx.send(event);
                            });
                        }

                        Some(TaskCommand::RunMakeTarget { name }) => {
                            let event_tx = self.event_tx.clone();

                            self.tasks.spawn(async move {
                                tracing::info!(target = %name, "Running make target");
                                let event = run_make_target(name).await;
                                let _ = event_tx.send(event);
                            });
                        }

                        Some(TaskCommand::FetchReferenceLists) => {
                            self.spawn_reference_fetch();
                        }

                        Some(TaskCommand::FetchStats) => {
                            let event_tx = self.event_tx.clone();
                            let client = self.client.clone();
                            let base = self.config.base_url.clone();

                            self.tasks.spawn(async move {
                                let event = fetch_stats(&client, &base).await;
                                let _ = event_tx.send(event);
                            });
                        }

                        Some(TaskCommand::Shutdown) | None => break,
                    }
                }

                _ = poll.tick() => {
                    tracing::debug!("Reference poll tick");
                    self.spawn_reference_fetch();
                }

                // Clean up completed tasks
                Some(_result) = self.tasks.join_next() => {}
            }
        }
    }

    fn spawn_reference_fetch(&mut self) {
        let event_tx = self.event_tx.clone();
        let client = self.client.clone();
        let base = self.config.base_url.clone();

        self.tasks.spawn(async move {
            let event = fetch_reference_lists(&client, &base).await;
            let _ = event_tx.send(event);
        });
    }
}
