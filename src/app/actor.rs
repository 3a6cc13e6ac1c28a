//! App actor - message loop processing UI events and task events

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{RenderState, TaskCommand, TaskEvent, UiEvent};

/// App actor that owns the application state. UI events and task events
/// arrive serially; no state mutation happens anywhere else.
pub struct AppActor {
    state: AppState,
    dispatch_tx: mpsc::UnboundedSender<TaskCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        dispatch_tx: mpsc::UnboundedSender<TaskCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            dispatch_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut task_rx: mpsc::UnboundedReceiver<TaskEvent>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        let _ = self.dispatch_tx.send(TaskCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(event) = task_rx.recv() => {
                    self.state.handle_task_event(event);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Navigation
            UiEvent::Back => return self.state.back(),
            UiEvent::MoveUp => self.state.move_up(),
            UiEvent::MoveDown => self.state.move_down(),
            UiEvent::FocusBuilder => self.state.focus_builder(),
            UiEvent::FocusList => self.state.focus_list(),
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),

            // Field editing
            UiEvent::FieldChar(c) => self.state.field_char(c),
            UiEvent::FieldBackspace => self.state.field_backspace(),

            // Search
            UiEvent::EnterSearch => self.state.enter_search(),
            UiEvent::SearchChar(c) => self.state.search_char(c),
            UiEvent::SearchBackspace => self.state.search_backspace(),
            UiEvent::LeaveSearch => self.state.leave_search(),

            // Actions
            UiEvent::Confirm => {
                if let Some(cmd) = self.state.confirm() {
                    let _ = self.dispatch_tx.send(cmd);
                }
            }
            UiEvent::RunTarget => {
                if let Some(cmd) = self.state.run_selected_target() {
                    let _ = self.dispatch_tx.send(cmd);
                }
            }
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Screen jumps
            UiEvent::GotoEndpointList => self.state.goto_endpoint_list(),
            UiEvent::GotoMakeCommands => self.state.goto_make_commands(),
            UiEvent::GotoHistory => self.state.goto_history(),
            UiEvent::GotoSettings => self.state.goto_settings(),
            UiEvent::OpenStats => {
                if let Some(cmd) = self.state.open_stats() {
                    let _ = self.dispatch_tx.send(cmd);
                }
            }
            UiEvent::DismissModal => self.state.dismiss_modal(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
