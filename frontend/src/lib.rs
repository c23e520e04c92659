use sauron::prelude::*;
use std::rc::Rc;

pub mod controller;
pub mod dialog;
pub mod error;
pub mod i18n;
pub mod render;
pub mod store;

use controller::{Msg, TaskController};
use store::TaskStore;

/// Binds the controller to sauron: every `Request` the controller asks for
/// becomes a `Cmd` that resolves to the completion message.
pub struct App {
    controller: TaskController,
    store: Rc<dyn TaskStore>,
}

impl App {
    pub fn new(controller: TaskController, store: Rc<dyn TaskStore>) -> Self {
        Self { controller, store }
    }

    fn run(&mut self, msg: Msg) -> Cmd<Msg> {
        match self.controller.update(msg) {
            Some(request) => {
                let store = Rc::clone(&self.store);
                Cmd::new(request.dispatch(store))
            }
            None => Cmd::none(),
        }
    }
}

impl Application for App {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        self.run(Msg::LoadTasks)
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        self.run(msg)
    }

    fn view(&self) -> Node<Msg> {
        render::view_page(&self.controller)
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let controller = TaskController::new(i18n::Messages::for_document(), Box::new(dialog::BrowserDialog));
    let store = Rc::new(store::HttpTaskStore::new(store::Endpoints::same_origin()));
    Program::mount_to_body(App::new(controller, store));
}
