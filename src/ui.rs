use crate::config::DashboardConfig;

pub fn render_index(config: &DashboardConfig) -> String {
    INDEX_HTML
        .replace("{{MIN_DATE}}", &config.min_date.to_string())
        .replace("{{MAX_DATE}}", &config.max_date.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Federal Highway Accidents</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&display=swap');

    :root {
      --bg: #1e1e1e;
      --panel: #323130;
      --ink: #d8d8d8;
      --muted: #8b857d;
      --accent: #ffa0a0;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      grid-template-columns: minmax(260px, 1fr) 2fr;
    }

    .controls {
      padding: 32px 24px;
      display: grid;
      align-content: start;
      gap: 14px;
    }

    h1 {
      font-size: 1.4rem;
      margin: 0 0 8px;
      letter-spacing: 0.04em;
    }

    label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    input, select {
      width: 100%;
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid #4a4846;
      background: var(--panel);
      color: var(--ink);
      font: inherit;
    }

    .hours {
      display: grid;
      grid-template-columns: repeat(6, 1fr);
      gap: 6px;
    }

    .hours button {
      border: 1px solid #4a4846;
      border-radius: 8px;
      padding: 6px 0;
      background: var(--panel);
      color: var(--ink);
      cursor: pointer;
      font: inherit;
      font-size: 0.8rem;
    }

    .hours button.active {
      background: #ffffff;
      color: #1e1e1e;
    }

    .summary {
      margin: 6px 0 0;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.85rem;
      color: var(--accent);
    }

    .charts {
      background: var(--panel);
      padding: 18px;
      display: grid;
      grid-template-rows: 3fr 2fr;
      gap: 12px;
    }

    svg {
      width: 100%;
      height: 100%;
    }

    .bar {
      cursor: pointer;
    }

    .bar-label, .axis-label {
      fill: #ffffff;
      font-size: 10px;
    }

    .legend-label {
      fill: var(--ink);
      font-size: 10px;
    }
  </style>
</head>
<body>
  <section class="controls">
    <h1>ACCIDENTS ON FEDERAL HIGHWAYS</h1>
    <p>Pick a date range below or select hours on the histogram.</p>

    <label for="start-date">Start date</label>
    <input id="start-date" type="date" value="{{MIN_DATE}}" min="{{MIN_DATE}}" max="{{MAX_DATE}}" />

    <label for="end-date">End date</label>
    <input id="end-date" type="date" value="{{MAX_DATE}}" min="{{MIN_DATE}}" max="{{MAX_DATE}}" />

    <label for="region">Region</label>
    <select id="region">
      <option value="">Select a region</option>
    </select>
    <small>The region only moves the map; it does not filter the data.</small>

    <label>Hours</label>
    <div class="hours" id="hours"></div>

    <p class="summary" id="total"></p>
    <p class="summary" id="total-selected"></p>
    <p class="status" id="status"></p>
  </section>

  <section class="charts">
    <svg id="map" viewBox="0 0 800 480" role="img" aria-label="Accident map"></svg>
    <svg id="histogram" viewBox="0 0 800 260" role="img" aria-label="Accidents per hour"></svg>
  </section>

  <script>
    const startEl = document.getElementById('start-date');
    const endEl = document.getElementById('end-date');
    const regionEl = document.getElementById('region');
    const hoursEl = document.getElementById('hours');
    const totalEl = document.getElementById('total');
    const selectedEl = document.getElementById('total-selected');
    const statusEl = document.getElementById('status');
    const mapEl = document.getElementById('map');
    const histogramEl = document.getElementById('histogram');

    let selectedHours = [];

    const setStatus = (message) => {
      statusEl.textContent = message || '';
    };

    const query = () => {
      const params = new URLSearchParams({
        start_date: startEl.value,
        end_date: endEl.value
      });
      if (selectedHours.length) {
        params.set('hours', selectedHours.join(','));
      }
      if (regionEl.value) {
        params.set('region', regionEl.value);
      }
      return params.toString();
    };

    const fetchJson = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const syncPickers = async () => {
      const bounds = await fetchJson(`/api/date-bounds?${query()}`);
      startEl.value = bounds.start_date;
      startEl.min = bounds.start.min;
      startEl.max = bounds.start.max;
      endEl.value = bounds.end_date;
      endEl.min = bounds.end.min;
      endEl.max = bounds.end.max;
    };

    const renderHourButtons = () => {
      hoursEl.innerHTML = '';
      for (let hour = 0; hour < 24; hour += 1) {
        const button = document.createElement('button');
        button.type = 'button';
        button.textContent = `${hour}:00`;
        button.classList.toggle('active', selectedHours.includes(hour));
        button.addEventListener('click', () => {
          selectedHours = selectedHours.includes(hour)
            ? selectedHours.filter((value) => value !== hour)
            : [...selectedHours, hour].sort((a, b) => a - b);
          refresh();
        });
        hoursEl.appendChild(button);
      }
    };

    const renderHistogram = (histogram) => {
      const width = 800;
      const height = 260;
      const bottom = 30;
      const barWidth = width / 24;
      const ceiling = histogram.y_max || 1;
      const scale = (height - bottom - 16) / ceiling;

      histogramEl.innerHTML = histogram.hours
        .map((hour, index) => {
          const count = histogram.counts[index];
          const barHeight = count * scale;
          const x = index * barWidth;
          const y = height - bottom - barHeight;
          return `
            <rect class="bar" data-hour="${hour}" x="${x + 1}" y="${y}" width="${barWidth - 2}" height="${barHeight}" fill="${histogram.colors[index]}"><title>${hour}:00</title></rect>
            <text class="bar-label" x="${x + barWidth / 2}" y="${y - 4}" text-anchor="middle">${count}</text>
            <text class="axis-label" x="${x + barWidth / 2}" y="${height - 10}" text-anchor="middle">${hour}:00</text>`;
        })
        .join('');

      histogramEl.querySelectorAll('.bar').forEach((bar) => {
        bar.addEventListener('click', async () => {
          const click = Number(bar.dataset.hour);
          try {
            const selection = await fetchJson('/api/selection', {
              method: 'POST',
              headers: { 'content-type': 'application/json' },
              body: JSON.stringify({ click, selected: [] })
            });
            selectedHours = selection.hours;
            refresh();
          } catch (err) {
            setStatus(err.message);
          }
        });
      });
    };

    const escapeHtml = (value) =>
      String(value)
        .replace(/&/g, '&amp;')
        .replace(/</g, '&lt;')
        .replace(/>/g, '&gt;')
        .replace(/"/g, '&quot;')
        .replace(/'/g, '&#39;');

    const renderMap = (map) => {
      const width = 800;
      const height = 480;
      const span = 360 / Math.pow(2, map.viewport.zoom) * 4;
      const project = (lat, lon) => [
        width / 2 + ((lon - map.viewport.lon) / span) * width,
        height / 2 - ((lat - map.viewport.lat) / span) * width
      ];

      const points = map.points
        .map((point) => {
          const [x, y] = project(point.lat, point.lon);
          const tip = Object.fromEntries(
            Object.entries(point.tooltip).map(([key, value]) => [key, escapeHtml(value)])
          );
          return `<circle cx="${x}" cy="${y}" r="${map.point_style.size / 2}" fill="${escapeHtml(point.color)}" fill-opacity="${map.point_style.opacity}"><title>Cause: ${tip.cause}
Type: ${tip.kind}
Classification: ${tip.classification}
Time: ${tip.time}
Date: ${tip.date}
Weather: ${tip.weather_condition}
People: ${tip.people}
Deaths: ${tip.deaths}
Minor injuries: ${tip.minor_injuries}
Severe injuries: ${tip.severe_injuries}
Uninjured: ${tip.uninjured}
Unknown: ${tip.unknown}
Vehicles: ${tip.vehicles}</title></circle>`;
        })
        .join('');

      const regions = map.regions
        .map((region) => {
          const [x, y] = project(region.lat, region.lon);
          return `<circle cx="${x}" cy="${y}" r="${map.region_style.size / 2}" fill="${map.region_style.color}"><title>${escapeHtml(region.code)}</title></circle>`;
        })
        .join('');

      const tick = 14;
      const legend = map.legend
        .map((entry, index) => {
          const y = 20 + index * tick;
          const label = index % 6 === 0 || index === map.legend.length - 1
            ? `<text class="legend-label" x="${width - 20}" y="${y + tick - 3}">${entry.hour}h</text>`
            : '';
          return `<rect x="${width - 40}" y="${y}" width="14" height="${tick}" fill="${escapeHtml(entry.color)}" />${label}`;
        })
        .join('');

      mapEl.innerHTML = `${points}${regions}${legend}`;
    };

    const refresh = async () => {
      try {
        await syncPickers();
        const view = await fetchJson(`/api/dashboard?${query()}`);
        selectedHours = view.hours;
        totalEl.textContent = view.summary.total_label;
        selectedEl.textContent = view.summary.selected_label;
        renderHourButtons();
        renderHistogram(view.histogram);
        renderMap(view.map);
        setStatus('');
      } catch (err) {
        setStatus(err.message);
      }
    };

    const loadRegions = async () => {
      const regions = await fetchJson('/api/regions');
      regions.forEach((region) => {
        const option = document.createElement('option');
        option.value = region.code;
        option.textContent = region.code;
        regionEl.appendChild(option);
      });
    };

    startEl.addEventListener('change', refresh);
    endEl.addEventListener('change', refresh);
    regionEl.addEventListener('change', refresh);

    loadRegions()
      .then(refresh)
      .catch((err) => setStatus(err.message));
  </script>
</body>
</html>
"#;
