//! Vincenty's direct and inverse solutions on the WGS-84 ellipsoid.
//!
//! Reference: T. Vincenty, "Direct and inverse solutions of geodesics on the
//! ellipsoid with application of nested equations", Survey Review, 1975.

use crate::geo::GeoPoint;
use anyhow::{Result, anyhow};

/// Semi-major axis [m]
const WGS84_A: f64 = 6_378_137.0;
/// Flattening
const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// Semi-minor axis [m]
const WGS84_B: f64 = (1.0 - WGS84_F) * WGS84_A;

const MAX_ITERATIONS: usize = 200;
const TOLERANCE: f64 = 1e-12;

fn series_a(u_sq: f64) -> f64 {
    1. + u_sq / 16384. * (4096. + u_sq * (-768. + u_sq * (320. - 175. * u_sq)))
}

fn series_b(u_sq: f64) -> f64 {
    u_sq / 1024. * (256. + u_sq * (-128. + u_sq * (74. - 47. * u_sq)))
}

fn delta_sigma(b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sm: f64) -> f64 {
    b * sin_sigma
        * (cos_2sm
            + b / 4.
                * (cos_sigma * (-1. + 2. * cos_2sm.powi(2))
                    - b / 6.
                        * cos_2sm
                        * (-3. + 4. * sin_sigma.powi(2))
                        * (-3. + 4. * cos_2sm.powi(2))))
}

/// Geodesic distance between two points in metres.
///
/// Fails when the iteration does not converge, which only happens for
/// nearly antipodal points.
pub fn distance(p1: GeoPoint, p2: GeoPoint) -> Result<f64> {
    let l = (p2.lon - p1.lon).to_radians();
    let u1 = ((1. - WGS84_F) * p1.lat.to_radians().tan()).atan();
    let u2 = ((1. - WGS84_F) * p2.lat.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut converged = false;
    let (mut sin_sigma, mut cos_sigma, mut sigma) = (0., 0., 0.);
    let (mut cos_sq_alpha, mut cos_2sm) = (0., 0.);

    for _ in 0..MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0. {
            // Coincident points
            return Ok(0.);
        }
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1. - sin_alpha.powi(2);
        cos_2sm = if cos_sq_alpha != 0. {
            cos_sigma - 2. * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            // Equatorial line
            0.
        };
        let c = WGS84_F / 16. * cos_sq_alpha * (4. + WGS84_F * (4. - 3. * cos_sq_alpha));
        let lambda_prev = lambda;
        let series = cos_2sm + c * cos_sigma * (-1. + 2. * cos_2sm.powi(2));
        lambda = l + (1. - c) * WGS84_F * sin_alpha * (sigma + c * sin_sigma * series);
        if (lambda - lambda_prev).abs() < TOLERANCE {
            converged = true;
            break;
        }
    }

    if !converged {
        return Err(anyhow!("Geodesic distance did not converge between {} and {}", p1, p2));
    }

    let u_sq = cos_sq_alpha * (WGS84_A.powi(2) - WGS84_B.powi(2)) / WGS84_B.powi(2);
    let a = series_a(u_sq);
    let b = series_b(u_sq);
    let d_sigma = delta_sigma(b, sin_sigma, cos_sigma, cos_2sm);

    Ok(WGS84_B * a * (sigma - d_sigma))
}

/// Point reached from `origin` after `distance_m` metres along the initial
/// `bearing_deg` (degrees clockwise from north).
pub fn destination(origin: GeoPoint, distance_m: f64, bearing_deg: f64) -> GeoPoint {
    if distance_m == 0. {
        return origin;
    }
    let alpha1 = bearing_deg.to_radians();
    let (sin_alpha1, cos_alpha1) = alpha1.sin_cos();

    let tan_u1 = (1. - WGS84_F) * origin.lat.to_radians().tan();
    let cos_u1 = 1. / (1. + tan_u1.powi(2)).sqrt();
    let sin_u1 = tan_u1 * cos_u1;
    let sigma1 = tan_u1.atan2(cos_alpha1);
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos_sq_alpha = 1. - sin_alpha.powi(2);
    let u_sq = cos_sq_alpha * (WGS84_A.powi(2) - WGS84_B.powi(2)) / WGS84_B.powi(2);
    let a = series_a(u_sq);
    let b = series_b(u_sq);

    let sigma0 = distance_m / (WGS84_B * a);
    let mut sigma = sigma0;
    for _ in 0..MAX_ITERATIONS {
        let cos_2sm = (2. * sigma1 + sigma).cos();
        let (sin_sigma, cos_sigma) = sigma.sin_cos();
        let sigma_prev = sigma;
        sigma = sigma0 + delta_sigma(b, sin_sigma, cos_sigma, cos_2sm);
        if (sigma - sigma_prev).abs() < TOLERANCE {
            break;
        }
    }

    let cos_2sm = (2. * sigma1 + sigma).cos();
    let (sin_sigma, cos_sigma) = sigma.sin_cos();
    let x = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
    let lat2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
        .atan2((1. - WGS84_F) * (sin_alpha.powi(2) + x.powi(2)).sqrt());
    let lambda =
        (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
    let c = WGS84_F / 16. * cos_sq_alpha * (4. + WGS84_F * (4. - 3. * cos_sq_alpha));
    let l = lambda
        - (1. - c)
            * WGS84_F
            * sin_alpha
            * (sigma + c * sin_sigma * (cos_2sm + c * cos_sigma * (-1. + 2. * cos_2sm.powi(2))));

    let mut lon2 = origin.lon + l.to_degrees();
    if lon2 > 180. {
        lon2 -= 360.;
    } else if lon2 < -180. {
        lon2 += 360.;
    }

    GeoPoint::new(lat2.to_degrees(), lon2)
}
