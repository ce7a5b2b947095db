use crate::config;
use crate::events::AppEvent;
use crate::gui::theme;
use crate::gui::wheel::{CircleWidget, Point, Touch};
use crate::theory::PitchClass;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub widget: Rc<RefCell<CircleWidget>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Touch(Touch, Point),
    SetTop(PitchClass),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::SetTop(top) => AppMsg::SetTop(top),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (CircleWidget, i32, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Circle of Fifths"),
            set_resizable: false,
            add_css_class: "fifths-window",

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_content_width: size,
                set_content_height: size,

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::Touch(Touch::Down, Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::Touch(Touch::Move, Point::new(x + dx, y + dy)));
                        }
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        let (x, y) = gesture.start_point().unwrap_or_default();
                        sender.input(AppMsg::Touch(Touch::Up, Point::new(x + dx, y + dy)));
                    },
                    connect_cancel[sender] => move |_, _| {
                        sender.input(AppMsg::Touch(Touch::Cancel, Point::default()));
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (widget, size, rx) = init;

        theme::load_css();

        let model = AppModel {
            widget: Rc::new(RefCell::new(widget)),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let widget_draw = model.widget.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let mut widget = widget_draw.borrow_mut();
                let result = widget
                    .on_size_changed(width, height)
                    .and_then(|_| widget.on_draw(cr));
                if let Err(e) = result {
                    // no way to draw the wheel without its layers
                    log::error!("Drawing error: {}", e);
                    relm4::main_application().quit();
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let redraw = match msg {
            AppMsg::Touch(touch, point) => {
                self.widget
                    .borrow_mut()
                    .on_touch_event(touch, point.x, point.y)
            }
            AppMsg::SetTop(top) => self.widget.borrow_mut().set_top_segment(top),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    log::info!("Configuration reloaded");
                    self.widget
                        .borrow_mut()
                        .set_style(new_config.wheel.highlight.0, &new_config.wheel.label_font)
                }
                Err(e) => {
                    log::error!("Failed to reload config: {}", e);
                    false
                }
            },
        };
        if redraw {
            self.drawing_area.queue_draw();
        }
    }
}
