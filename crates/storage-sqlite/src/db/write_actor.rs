//! Single-writer actor for SQLite.
//!
//! SQLite allows one writer at a time; funneling every write through one
//! dedicated connection avoids `SQLITE_BUSY` under concurrent sweeps. Each
//! job runs inside an immediate transaction, so a job either commits all of
//! its statements or none of them.

use std::any::Any;
use std::sync::Arc;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use skycast_core::errors::Result;

// A write job: runs against the actor's connection, inside a transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    // Jobs are type-erased through Box<dyn Any> so one channel serves
    // every return type; a oneshot carries the reply.
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside an immediate transaction; returning an error
    /// rolls the whole transaction back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("writer actor channel closed; the actor has stopped");

        ret_rx
            .await
            .expect("writer actor dropped the reply sender without answering")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer actor returned an unexpected type"))
            })
    }
}

/// Spawns a background task that acts as the single writer to the database.
///
/// The actor owns one connection from the pool and processes write jobs
/// serially for the lifetime of the process.
pub fn spawn_writer(pool: Arc<DbPool>) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("failed to acquire the writer actor's connection from the pool");

        while let Some((job, reply_tx)) = rx.recv().await {
            // Run the job inside an immediate transaction. StorageError is
            // the transaction error type because it implements
            // From<diesel::result::Error>; convert back at the boundary.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // The receiver may have been dropped (caller cancelled); that is
            // not an actor failure.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
