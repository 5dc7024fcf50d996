//! Hosts a [`Player`] on a tokio task.
//!
//! The task owns the player outright. It waits on whichever comes first: the
//! next command from a [`PlayerHandle`] or the player's single pending
//! deadline. Commands win ties, so a seek issued at the same instant as a tick
//! is never overwritten by it. When every handle is dropped the task ends and
//! the player, its timer and its callback go with it.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use super::{FrameCallback, PlaybackStatus, Player};
use crate::timeline::TokioClock;
use crate::{Frame, Result, VisualiserError};

const COMMAND_BUFFER: usize = 32;

enum Command<T> {
    Load(Vec<Frame<T>>),
    Play,
    Pause,
    StepForward,
    StepBackward,
    GoTo(isize),
    Reset,
    Clear,
    SetSpeed(Duration),
    Subscribe(FrameCallback<T>),
    Status(oneshot::Sender<PlaybackStatus>),
    Current(oneshot::Sender<Option<Frame<T>>>),
    Shutdown,
}

/// Cloneable control surface for a player running on a tokio task.
pub struct PlayerHandle<T> {
    commands: mpsc::Sender<Command<T>>,
}

impl<T> Clone for PlayerHandle<T> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
        }
    }
}

impl<T> std::fmt::Debug for PlayerHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerHandle")
            .field("closed", &self.commands.is_closed())
            .finish()
    }
}

/// Moves `player` onto a new tokio task and returns a handle to drive it.
///
/// Must be called from within a tokio runtime.
pub fn spawn_player<T>(player: Player<T, TokioClock>) -> PlayerHandle<T>
where
    T: Clone + Send + 'static,
{
    let (commands, inbox) = mpsc::channel(COMMAND_BUFFER);
    tokio::spawn(run(player, inbox));
    PlayerHandle { commands }
}

async fn run<T: Clone>(mut player: Player<T, TokioClock>, mut inbox: mpsc::Receiver<Command<T>>) {
    tracing::debug!("player task started");
    loop {
        let wake = player
            .next_deadline()
            .map(|deadline| player.clock().instant_at(deadline));
        let sleep = tokio::time::sleep_until(wake.unwrap_or_else(tokio::time::Instant::now));

        tokio::select! {
            biased;
            command = inbox.recv() => match command {
                Some(Command::Shutdown) | None => break,
                Some(command) => apply(&mut player, command),
            },
            _ = sleep, if wake.is_some() => {
                player.poll();
            }
        }
    }
    player.clear();
    tracing::debug!("player task stopped");
}

fn apply<T: Clone>(player: &mut Player<T, TokioClock>, command: Command<T>) {
    match command {
        Command::Load(frames) => player.load_frames(frames),
        Command::Play => player.play(),
        Command::Pause => player.pause(),
        Command::StepForward => player.step_forward(),
        Command::StepBackward => player.step_backward(),
        Command::GoTo(index) => player.go_to_frame(index),
        Command::Reset => player.reset(),
        Command::Clear => player.clear(),
        Command::SetSpeed(speed) => player.set_speed(speed),
        Command::Subscribe(callback) => player.set_callback(callback),
        Command::Status(reply) => {
            let _ = reply.send(player.status());
        }
        Command::Current(reply) => {
            let _ = reply.send(player.current().cloned());
        }
        Command::Shutdown => {}
    }
}

impl<T> PlayerHandle<T> {
    pub async fn load_frames(&self, frames: Vec<Frame<T>>) -> Result<()> {
        self.send(Command::Load(frames)).await
    }

    pub async fn play(&self) -> Result<()> {
        self.send(Command::Play).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.send(Command::Pause).await
    }

    pub async fn step_forward(&self) -> Result<()> {
        self.send(Command::StepForward).await
    }

    pub async fn step_backward(&self) -> Result<()> {
        self.send(Command::StepBackward).await
    }

    pub async fn go_to_frame(&self, index: isize) -> Result<()> {
        self.send(Command::GoTo(index)).await
    }

    pub async fn reset(&self) -> Result<()> {
        self.send(Command::Reset).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.send(Command::Clear).await
    }

    pub async fn set_speed(&self, speed: Duration) -> Result<()> {
        self.send(Command::SetSpeed(speed)).await
    }

    /// Replaces the consumer. The callback runs on the player task.
    pub async fn subscribe<F>(&self, callback: F) -> Result<()>
    where
        F: FnMut(&T, usize) + Send + 'static,
    {
        self.send(Command::Subscribe(Box::new(callback))).await
    }

    /// Snapshot of the transport state after every earlier command has been
    /// applied.
    pub async fn status(&self) -> Result<PlaybackStatus> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Status(reply)).await?;
        response.await.map_err(|_| VisualiserError::PlayerClosed)
    }

    /// Copy of the active frame, `None` before the first frame.
    pub async fn current(&self) -> Result<Option<Frame<T>>> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Current(reply)).await?;
        response.await.map_err(|_| VisualiserError::PlayerClosed)
    }

    /// Stops the task even if other handles are still alive.
    pub async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }

    /// Resolves once the player task has ended.
    pub async fn closed(&self) {
        self.commands.closed().await
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    async fn send(&self, command: Command<T>) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| VisualiserError::PlayerClosed)
    }
}
