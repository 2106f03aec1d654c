use serde::{Deserialize, Serialize};
use umbra_core::constants::{PLATEAU_ELEVATION, PLATEAU_MIN, PLATEAU_SIZE, WAVE_PERIOD};
use umbra_core::{HeightField, UmbraError};

/// Axis-aligned raised rectangle covering `[x, x + width) x [y, y + depth)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub depth: u32,
    pub elevation: f32,
}

impl Block {
    /// The 20x20 plateau at `[40, 60)` used by the sample scenes.
    pub const fn sample_plateau() -> Self {
        Self {
            x: PLATEAU_MIN,
            y: PLATEAU_MIN,
            width: PLATEAU_SIZE,
            depth: PLATEAU_SIZE,
            elevation: PLATEAU_ELEVATION,
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x
            && y >= self.y
            && x - self.x < self.width
            && y - self.y < self.depth
    }
}

/// Terrain recipe a scene is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Every cell at `elevation`.
    Flat { elevation: f32 },
    /// A raised rectangle over a flat 0.0 base. Clipped to the grid.
    Plateau {
        x: u32,
        y: u32,
        width: u32,
        depth: u32,
        elevation: f32,
    },
    /// Rolling sine terrain `(sin(x/p) + sin(y/p)) * 0.5 + 0.5`, with an
    /// optional block overriding the height inside it.
    Waves {
        #[serde(default = "default_wave_period")]
        period: f32,
        #[serde(default)]
        block: Option<Block>,
    },
    /// Multi-octave 2D simplex noise, deterministic per seed.
    Noise {
        seed: u64,
        #[serde(default = "default_noise_scale")]
        scale: f64,
        #[serde(default = "default_noise_amplitude")]
        amplitude: f32,
    },
}

fn default_wave_period() -> f32 {
    WAVE_PERIOD
}

fn default_noise_scale() -> f64 {
    0.02
}

fn default_noise_amplitude() -> f32 {
    2.0
}

impl TerrainKind {
    /// The sample plateau as a terrain recipe.
    pub fn sample_plateau() -> Self {
        let b = Block::sample_plateau();
        TerrainKind::Plateau {
            x: b.x,
            y: b.y,
            width: b.width,
            depth: b.depth,
            elevation: b.elevation,
        }
    }
}

/// Build a height field of `width x height` cells from a terrain recipe.
pub fn generate_field(
    kind: &TerrainKind,
    width: u32,
    height: u32,
) -> Result<HeightField, UmbraError> {
    log::debug!("Generating {width}x{height} terrain: {kind:?}");
    match *kind {
        TerrainKind::Flat { elevation } => HeightField::flat(width, height, elevation),
        TerrainKind::Plateau {
            x,
            y,
            width: bw,
            depth,
            elevation,
        } => {
            let block = Block {
                x,
                y,
                width: bw,
                depth,
                elevation,
            };
            HeightField::from_fn(width, height, |cx, cy| {
                if block.contains(cx, cy) {
                    block.elevation
                } else {
                    0.0
                }
            })
        }
        TerrainKind::Waves { period, block } => {
            let period = if period > 0.0 { period } else { WAVE_PERIOD };
            HeightField::from_fn(width, height, |cx, cy| match block {
                Some(b) if b.contains(cx, cy) => b.elevation,
                _ => ((cx as f32 / period).sin() + (cy as f32 / period).sin()) * 0.5 + 0.5,
            })
        }
        TerrainKind::Noise {
            seed,
            scale,
            amplitude,
        } => {
            let noise = SimplexTerrain::new(seed);
            HeightField::from_fn(width, height, |cx, cy| {
                noise.sample(cx as f64, cy as f64, scale, amplitude)
            })
        }
    }
}

/// Heightmap source backed by 2D simplex noise.
pub struct SimplexTerrain {
    /// Permutation table for simplex noise (doubled for wrapping).
    perm: [u8; 512],
}

impl SimplexTerrain {
    pub fn new(seed: u64) -> Self {
        let perm = Self::build_permutation(seed);
        Self { perm }
    }

    /// Terrain height at `(x, y)` from 3 octaves of simplex noise,
    /// remapped into `[0, amplitude]`.
    pub fn sample(&self, x: f64, y: f64, scale: f64, amplitude: f32) -> f32 {
        // octave weights 4:2:1, normalized so the sum stays in [-1, 1]
        let mut n = 0.0f64;
        n += self.simplex2d(x * scale, y * scale) * 4.0;
        n += self.simplex2d(x * scale * 2.0 + 100.0, y * scale * 2.0 + 100.0) * 2.0;
        n += self.simplex2d(x * scale * 4.0 + 200.0, y * scale * 4.0 + 200.0);
        n /= 7.0;

        let h = (n * 0.5 + 0.5).clamp(0.0, 1.0) as f32 * amplitude;
        h.max(0.0)
    }

    /// 2D simplex noise. Returns value in [-1, 1].
    fn simplex2d(&self, x: f64, y: f64) -> f64 {
        const F2: f64 = 0.5 * (1.732_050_807_568_877_2 - 1.0); // (sqrt(3)-1)/2
        const G2: f64 = (3.0 - 1.732_050_807_568_877_2) / 6.0; // (3-sqrt(3))/6

        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();

        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;

        let gi0 = self.perm[ii + self.perm[jj] as usize] as usize % 12;
        let gi1 = self.perm[ii + i1 + self.perm[jj + j1] as usize] as usize % 12;
        let gi2 = self.perm[ii + 1 + self.perm[jj + 1] as usize] as usize % 12;

        let n0 = Self::corner_contribution(gi0, x0, y0);
        let n1 = Self::corner_contribution(gi1, x1, y1);
        let n2 = Self::corner_contribution(gi2, x2, y2);

        70.0 * (n0 + n1 + n2)
    }

    fn corner_contribution(gi: usize, x: f64, y: f64) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            0.0
        } else {
            let t = t * t;
            t * t * Self::grad2d(gi, x, y)
        }
    }

    fn grad2d(hash: usize, x: f64, y: f64) -> f64 {
        const GRAD: [[f64; 2]; 12] = [
            [1.0, 1.0],
            [-1.0, 1.0],
            [1.0, -1.0],
            [-1.0, -1.0],
            [1.0, 0.0],
            [-1.0, 0.0],
            [0.0, 1.0],
            [0.0, -1.0],
            [1.0, 1.0],
            [-1.0, 1.0],
            [1.0, -1.0],
            [-1.0, -1.0],
        ];
        let g = &GRAD[hash % 12];
        g[0] * x + g[1] * y
    }

    fn build_permutation(seed: u64) -> [u8; 512] {
        let mut p: [u8; 256] = [0; 256];
        for (i, val) in p.iter_mut().enumerate() {
            *val = i as u8;
        }

        // Fisher-Yates shuffle with an LCG seeded stream
        let mut rng = seed;
        for i in (1..256).rev() {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let j = (rng >> 33) as usize % (i + 1);
            p.swap(i, j);
        }

        let mut perm = [0u8; 512];
        for (i, val) in perm.iter_mut().enumerate() {
            *val = p[i & 255];
        }
        perm
    }
}
