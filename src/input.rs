use super::*;

use glutin::VirtualKeyCode;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    ToggleNormals,
    ToggleLight(LightKind),
    ToggleShininessCycling,
    ToggleExponentOscillation,
    ToggleCutoffOscillation,
    Reinitialize,
}

/// Key bindings in the order they are listed at startup.
pub const KEY_BINDINGS: &[(VirtualKeyCode, Action, &str)] = &[
    (VirtualKeyCode::Q,      Action::Quit,                          "quit"),
    (VirtualKeyCode::Escape, Action::Quit,                          "quit"),
    (VirtualKeyCode::Space,  Action::TogglePause,                   "play / pause the animation"),
    (VirtualKeyCode::N,      Action::ToggleNormals,                 "draw the quad normal vectors"),
    (VirtualKeyCode::P,      Action::ToggleLight(LightKind::Point),       "point light"),
    (VirtualKeyCode::D,      Action::ToggleLight(LightKind::Directional), "directional light"),
    (VirtualKeyCode::S,      Action::ToggleLight(LightKind::Spot),        "spot light"),
    (VirtualKeyCode::T,      Action::ToggleShininessCycling,        "time-varying shininess in specular reflection"),
    (VirtualKeyCode::E,      Action::ToggleExponentOscillation,     "oscillate the spot light exponent"),
    (VirtualKeyCode::C,      Action::ToggleCutoffOscillation,       "oscillate the spot light cutoff"),
    (VirtualKeyCode::R,      Action::Reinitialize,                  "reinitialize the animation"),
];

pub fn action_for_key(key: VirtualKeyCode) -> Option<Action> {
    KEY_BINDINGS.iter()
        .find(|&&(bound, _, _)| bound == key)
        .map(|&(_, action, _)| action)
}

/// Applies everything except [`Action::Quit`], which belongs to the event loop.
/// Returns `false` for quit so the caller can stop.
pub fn apply(action: Action, animation: &mut Animation) -> bool {
    match action {
        Action::Quit => return false,
        Action::TogglePause => {
            let paused = animation.toggle_pause();
            debug!("animation {}", if paused { "paused" } else { "running" });
        },
        Action::ToggleNormals => {
            let on = animation.toggle_normals();
            debug!("normal vectors {}", on_off(on));
        },
        Action::ToggleLight(kind) => {
            let on = animation.toggle_light(kind);
            debug!("{} light {}", kind.name(), on_off(on));
        },
        Action::ToggleShininessCycling => {
            let on = animation.toggle_shininess_cycling();
            debug!("shininess cycling {}", on_off(on));
        },
        Action::ToggleExponentOscillation => {
            let on = animation.toggle_exponent_oscillation();
            debug!("exponent oscillation {}", on_off(on));
        },
        Action::ToggleCutoffOscillation => {
            let on = animation.toggle_cutoff_oscillation();
            debug!("cutoff oscillation {}", on_off(on));
        },
        Action::Reinitialize => {
            animation.reinitialize();
            debug!("animation reinitialized");
        },
    }
    true
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

pub fn log_key_help() {
    info!("Draw a torus model");
    for &(key, _, description) in KEY_BINDINGS.iter() {
        info!("  {:?}: {}", key, description);
    }
}
