//! Node records of a single slightly distorted cube

#![allow(dead_code)]

pub const CUBE: [[f64; 12]; 8] = [
    [
        -2.289980638815949e-01, 4.359194295533442e-01, 8.999804972376069e-01, -3.058680031475802e-03,
        -1.511407546634700e-01, -8.941847677301773e-01, 4.327219253197345e-01, -1.148274205442501e-01,
        2.816184518038198e-01, -1.020188811207134e-01, 5.279052872619872e-02, 9.933807467166211e-01,
    ],
    [
        2.069213656672715e-01, 4.359194295255886e-01, 8.999804972376069e-01, -3.058680031475802e-03,
        -1.045325522391338e+00, -8.941847677856885e-01, 4.327219252919789e-01, -1.148274205720057e-01,
        1.795995706824838e-01, -1.020188811207134e-01, 5.279052872619872e-02, 9.933807467166211e-01,
    ],
    [
        6.709824333617289e-01, 4.359194295533442e-01, 8.999804972376069e-01, -3.058679975964651e-03,
        2.815811706620580e-01, -8.941847677301773e-01, 4.327219253197345e-01, -1.148274205164945e-01,
        3.344089805398314e-01, -1.020188811207134e-01, 5.279052872619872e-02, 9.933807467166211e-01,
    ],
    [
        1.106901862910595e+00, 4.359194295533442e-01, 8.999804971265846e-01, -3.058679975964651e-03,
        -6.126035970658102e-01, -8.941847677301773e-01, 4.327219252919789e-01, -1.148274205720057e-01,
        2.323900994184954e-01, -1.020188811207134e-01, 5.279052874007650e-02, 9.933807467304989e-01,
    ],
    [
        -2.320567438992561e-01, 4.359194295533442e-01, 8.999804972376069e-01, -3.058680017598014e-03,
        -2.659681751954428e-01, -8.941847677301773e-01, 4.327219253197345e-01, -1.148274205164945e-01,
        1.274999198532144e+00, -1.020188811207134e-01, 5.279052872619872e-02, 9.933807466611100e-01,
    ],
    [
        2.038626856496103e-01, 4.359194295255886e-01, 8.999804972376069e-01, -3.058680031475802e-03,
        -1.160152942923311e+00, -8.941847676746661e-01, 4.327219252919789e-01, -1.148274205720057e-01,
        1.172980317410808e+00, -1.020188811207134e-01, 5.279052883722102e-02, 9.933807467721323e-01,
    ],
    [
        6.679237533440678e-01, 4.359194295533442e-01, 8.999804971265846e-01, -3.058679975964651e-03,
        1.667537501300853e-01, -8.941847677301773e-01, 4.327219252919789e-01, -1.148274205164945e-01,
        1.327789727268156e+00, -1.020188811207134e-01, 5.279052872619872e-02, 9.933807467721323e-01,
    ],
    [
        1.103843182892934e+00, 4.359194295533442e-01, 8.999804971265846e-01, -3.058680086986953e-03,
        -7.274310175977829e-01, -8.941847677856885e-01, 4.327219252919789e-01, -1.148274204609834e-01,
        1.225770846146820e+00, -1.020188811207134e-01, 5.279052872619872e-02, 9.933807467721323e-01,
    ],
];

/// Cube records as read from a file
pub fn cube_records() -> Vec<Vec<f64>> {
    CUBE.iter().map(|record| record.to_vec()).collect()
}
